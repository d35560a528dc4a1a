//! Growable monomial buffer — a transient container used while parsing a
//! polynomial literal, before the finished list is handed to
//! [`crate::poly::Poly::from_monomials`].

use crate::poly::Monomial;

/// A thin growable-vector wrapper over [`Monomial`]s. Reuses `Vec`'s
/// amortized doubling growth; there is no separate "destroy contents" step
/// because [`MonoBuf::into_vec`] is the only handoff every caller needs.
#[derive(Debug, Default)]
pub struct MonoBuf {
    monos: Vec<Monomial>,
}

impl MonoBuf {
    pub fn new() -> Self {
        MonoBuf { monos: Vec::new() }
    }

    pub fn push(&mut self, m: Monomial) {
        self.monos.push(m);
    }

    pub fn len(&self) -> usize {
        self.monos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monos.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&Monomial> {
        self.monos.get(i)
    }

    /// Hands off ownership of the accumulated monomials as a plain `Vec`.
    pub fn into_vec(self) -> Vec<Monomial> {
        self.monos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poly::Poly;

    #[test]
    fn push_and_into_vec() {
        let mut buf = MonoBuf::new();
        buf.push(Monomial::new(Poly::Scalar(1), 0));
        buf.push(Monomial::new(Poly::Scalar(2), 3));
        assert_eq!(buf.len(), 2);
        let v = buf.into_vec();
        assert_eq!(v.len(), 2);
        assert_eq!(v[1].exp, 3);
    }
}
