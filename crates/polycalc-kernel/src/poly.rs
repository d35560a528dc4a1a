//! Recursive sparse polynomial representation and algebra.
//!
//! A [`Poly`] is either a bare integer (`Scalar`) or a sum of [`Monomial`]s in
//! the outermost variable, where each monomial's coefficient is itself a
//! `Poly` in the next-deeper variable. The outermost `Poly` is in `x_0`; the
//! coefficient one level inside a monomial is in `x_1`, and so on. Every
//! `Poly` produced by this module is in canonical form (see [`is_canonical`]).

use std::fmt;

/// A polynomial: a bounded-integer scalar, or a sum of monomials in the
/// current variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Poly {
    /// The constant polynomial equal to a bounded signed integer.
    Scalar(i64),
    /// A non-empty, exponent-sorted sum of monomials. Never collapsible to a
    /// `Scalar` and never contains a zero-coefficient term.
    Sum(Vec<Monomial>),
}

/// One term of a [`Poly::Sum`]: a coefficient polynomial in the next variable,
/// raised to a non-negative exponent of the current variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monomial {
    pub coeff: Poly,
    pub exp: u32,
}

impl Monomial {
    pub fn new(coeff: Poly, exp: u32) -> Self {
        Monomial { coeff, exp }
    }
}

impl Poly {
    /// The zero polynomial, `Scalar(0)`.
    pub fn zero() -> Poly {
        Poly::Scalar(0)
    }

    /// A constant polynomial.
    pub fn from_scalar(c: i64) -> Poly {
        Poly::Scalar(c)
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Poly::Scalar(_))
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Poly::Scalar(0))
    }

    /// Builds a canonical polynomial from an arbitrary (unsorted, possibly
    /// colliding, possibly zero-containing) list of monomials.
    ///
    /// Replaces the source's `AddMonos`/`OwnMonos`/`CloneMonos` trio: in Rust
    /// the move-vs-clone choice is made at the call site (`monos` vs.
    /// `monos.clone()`), so one entry point suffices.
    pub fn from_monomials(mut monos: Vec<Monomial>) -> Poly {
        monos.sort_by_key(|m| m.exp);

        let mut write = 0usize;
        for i in 0..monos.len() {
            if i == write {
                continue;
            }
            if monos[i].exp == monos[write].exp {
                let taken = std::mem::replace(&mut monos[i].coeff, Poly::zero());
                let combined = add(&monos[write].coeff, &taken);
                monos[write].coeff = combined;
            } else if monos[write].coeff.is_zero() {
                monos.swap(write, i);
            } else {
                write += 1;
                if write != i {
                    monos.swap(write, i);
                }
            }
        }
        let last_len = if monos.is_empty() {
            0
        } else if monos[write].coeff.is_zero() {
            write
        } else {
            write + 1
        };
        monos.truncate(last_len);
        monos.shrink_to_fit();

        collapse(monos)
    }

    /// Degree of the whole polynomial (max over all variables). `-1` for zero.
    pub fn degree(&self) -> i64 {
        match self {
            Poly::Scalar(0) => -1,
            Poly::Scalar(_) => 0,
            Poly::Sum(terms) => terms
                .iter()
                .map(|m| m.coeff.degree() + m.exp as i64)
                .max()
                .unwrap_or(-1),
        }
    }

    /// Degree in the `var`-th variable (0-based, 0 is outermost).
    pub fn degree_by(&self, var: u32) -> i64 {
        match self {
            Poly::Scalar(0) => -1,
            Poly::Scalar(_) => 0,
            Poly::Sum(terms) => {
                if var == 0 {
                    terms.iter().map(|m| m.exp as i64).max().unwrap_or(-1)
                } else {
                    terms
                        .iter()
                        .map(|m| m.coeff.degree_by(var - 1))
                        .max()
                        .unwrap_or(-1)
                }
            }
        }
    }

    /// `self + other`.
    pub fn add(&self, other: &Poly) -> Poly {
        add(self, other)
    }

    /// `-self`.
    pub fn neg(&self) -> Poly {
        neg(self)
    }

    /// `self - other`.
    pub fn sub(&self, other: &Poly) -> Poly {
        sub(self, other)
    }

    /// `self * other`.
    pub fn mul(&self, other: &Poly) -> Poly {
        mul(self, other)
    }

    /// Substitutes `x` for the outermost variable, returning a polynomial in
    /// the remaining (reindexed) variables.
    pub fn at(&self, x: i64) -> Poly {
        match self {
            Poly::Scalar(_) => self.clone(),
            Poly::Sum(terms) => {
                if x == 0 {
                    return terms
                        .iter()
                        .find(|m| m.exp == 0)
                        .map(|m| m.coeff.clone())
                        .unwrap_or_else(Poly::zero);
                }
                let mut acc = Poly::zero();
                for m in terms {
                    let power = x.wrapping_pow(m.exp);
                    let contribution = scalar_mul(&m.coeff, power);
                    acc = add(&acc, &contribution);
                }
                acc
            }
        }
    }

    /// Substitutes `qs[i]` for `x_i` for each `i < qs.len()`; variables beyond
    /// `qs.len()` are substituted with zero.
    pub fn compose(&self, qs: &[Poly]) -> Poly {
        compose_at(self, 0, qs)
    }
}

/// Wrapping-aware multiplication of a Poly by a plain scalar, used by `at`.
fn scalar_mul(p: &Poly, s: i64) -> Poly {
    mul(p, &Poly::Scalar(s))
}

fn add(p: &Poly, q: &Poly) -> Poly {
    match (p, q) {
        (Poly::Scalar(a), Poly::Scalar(b)) => Poly::Scalar(a.wrapping_add(*b)),
        (Poly::Scalar(_), Poly::Sum(_)) => add_scalar_to_sum(q, p),
        (Poly::Sum(_), Poly::Scalar(_)) => add_scalar_to_sum(p, q),
        (Poly::Sum(ta), Poly::Sum(tb)) => {
            let mut merged = Vec::with_capacity(ta.len() + tb.len());
            let (mut i, mut j) = (0, 0);
            while i < ta.len() && j < tb.len() {
                if ta[i].exp < tb[j].exp {
                    merged.push(ta[i].clone());
                    i += 1;
                } else if ta[i].exp > tb[j].exp {
                    merged.push(tb[j].clone());
                    j += 1;
                } else {
                    let coeff = add(&ta[i].coeff, &tb[j].coeff);
                    if !coeff.is_zero() {
                        merged.push(Monomial::new(coeff, ta[i].exp));
                    }
                    i += 1;
                    j += 1;
                }
            }
            merged.extend_from_slice(&ta[i..]);
            merged.extend_from_slice(&tb[j..]);
            collapse(merged)
        }
    }
}

/// Adds a scalar into a sum by combining with (or inserting) the
/// constant-exponent term.
fn add_scalar_to_sum(sum: &Poly, scalar: &Poly) -> Poly {
    let Poly::Sum(terms) = sum else {
        unreachable!("add_scalar_to_sum requires a Sum")
    };
    let Poly::Scalar(c) = scalar else {
        unreachable!("add_scalar_to_sum requires a Scalar")
    };
    if *c == 0 {
        return sum.clone();
    }
    let mut out = Vec::with_capacity(terms.len() + 1);
    let mut inserted = false;
    for m in terms {
        if m.exp == 0 {
            let combined = add(&m.coeff, scalar);
            if !combined.is_zero() {
                out.push(Monomial::new(combined, 0));
            }
            inserted = true;
        } else {
            out.push(m.clone());
        }
    }
    if !inserted {
        out.push(Monomial::new(Poly::Scalar(*c), 0));
    }
    collapse(out)
}

fn neg(p: &Poly) -> Poly {
    match p {
        Poly::Scalar(c) => Poly::Scalar(c.wrapping_neg()),
        Poly::Sum(terms) => {
            let negated: Vec<Monomial> = terms
                .iter()
                .map(|m| Monomial::new(neg(&m.coeff), m.exp))
                .collect();
            // Negation never merges exponents or loses canonical form:
            // coefficients were nonzero and stay nonzero under negation.
            collapse(negated)
        }
    }
}

fn sub(p: &Poly, q: &Poly) -> Poly {
    add(p, &neg(q))
}

fn mul(p: &Poly, q: &Poly) -> Poly {
    match (p, q) {
        (Poly::Scalar(a), Poly::Scalar(b)) => Poly::Scalar(a.wrapping_mul(*b)),
        (Poly::Scalar(0), _) | (_, Poly::Scalar(0)) => Poly::zero(),
        (Poly::Scalar(s), Poly::Sum(terms)) | (Poly::Sum(terms), Poly::Scalar(s)) => {
            let scaled: Vec<Monomial> = terms
                .iter()
                .map(|m| Monomial::new(mul(&m.coeff, &Poly::Scalar(*s)), m.exp))
                .filter(|m| !m.coeff.is_zero())
                .collect();
            collapse(scaled)
        }
        (Poly::Sum(ta), Poly::Sum(tb)) => {
            let mut cross = Vec::with_capacity(ta.len() * tb.len());
            for a in ta {
                for b in tb {
                    let coeff = mul(&a.coeff, &b.coeff);
                    if !coeff.is_zero() {
                        cross.push(Monomial::new(coeff, a.exp + b.exp));
                    }
                }
            }
            Poly::from_monomials(cross)
        }
    }
}

/// Applies the single-scalar-monomial collapse rule and the empty-sum rule
/// to an already exponent-sorted, zero-free, exponent-unique term vector.
fn collapse(terms: Vec<Monomial>) -> Poly {
    if terms.is_empty() {
        return Poly::zero();
    }
    if terms.len() == 1 && terms[0].exp == 0 && terms[0].coeff.is_scalar() {
        return terms.into_iter().next().unwrap().coeff;
    }
    Poly::Sum(terms)
}

/// `level` is the variable index `p` is currently expressed in.
fn compose_at(p: &Poly, level: usize, qs: &[Poly]) -> Poly {
    match p {
        Poly::Scalar(_) => p.clone(),
        Poly::Sum(terms) => {
            if level >= qs.len() || qs[level].is_zero() {
                return terms
                    .iter()
                    .find(|m| m.exp == 0)
                    .map(|m| compose_at(&m.coeff, level + 1, qs))
                    .unwrap_or_else(Poly::zero);
            }
            let q = &qs[level];
            let mut acc = Poly::zero();
            let mut power = Poly::Scalar(1);
            let mut prev_exp: u32 = 0;
            for (i, m) in terms.iter().enumerate() {
                let delta = if i == 0 { m.exp } else { m.exp - prev_exp };
                if delta > 0 {
                    power = mul(&power, &pow(q, delta));
                }
                prev_exp = m.exp;
                if power.is_zero() {
                    continue;
                }
                let inner = compose_at(&m.coeff, level + 1, qs);
                if inner.is_zero() {
                    continue;
                }
                acc = add(&acc, &mul(&inner, &power));
            }
            acc
        }
    }
}

/// Repeated squaring for a `Poly` base and a small non-negative exponent.
fn pow(base: &Poly, mut exp: u32) -> Poly {
    let mut result = Poly::Scalar(1);
    let mut b = base.clone();
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul(&result, &b);
        }
        b = mul(&b, &b);
        exp >>= 1;
    }
    result
}

/// Verifies every canonical-form invariant from the data model. Used in tests
/// and debug assertions to check that every operation's output is canonical.
pub fn is_canonical(p: &Poly) -> bool {
    match p {
        Poly::Scalar(_) => true,
        Poly::Sum(terms) => {
            if terms.is_empty() {
                return false;
            }
            if terms.len() == 1 && terms[0].exp == 0 && terms[0].coeff.is_scalar() {
                return false;
            }
            let mut last_exp: Option<u32> = None;
            for m in terms {
                if m.coeff.is_zero() {
                    return false;
                }
                if let Some(prev) = last_exp {
                    if m.exp <= prev {
                        return false;
                    }
                }
                last_exp = Some(m.exp);
                if !is_canonical(&m.coeff) {
                    return false;
                }
            }
            true
        }
    }
}

impl fmt::Display for Poly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Poly::Scalar(c) => write!(f, "{}", c),
            Poly::Sum(terms) => {
                for (i, m) in terms.iter().enumerate() {
                    if i > 0 {
                        write!(f, "+")?;
                    }
                    write!(f, "({},{})", m.coeff, m.exp)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(c: i64) -> Poly {
        Poly::Scalar(c)
    }

    fn mono(c: Poly, e: u32) -> Monomial {
        Monomial::new(c, e)
    }

    #[test]
    fn from_monomials_sorts_and_drops_zeros() {
        let p = Poly::from_monomials(vec![mono(s(0), 5), mono(s(1), 2), mono(s(3), 0)]);
        assert_eq!(p.to_string(), "(3,0)+(1,2)");
        assert!(is_canonical(&p));
    }

    #[test]
    fn single_constant_term_collapses() {
        let p = Poly::from_monomials(vec![mono(s(7), 0)]);
        assert_eq!(p, s(7));
    }

    #[test]
    fn empty_monomials_is_zero() {
        let p = Poly::from_monomials(vec![]);
        assert_eq!(p, Poly::zero());
    }

    #[test]
    fn combining_like_exponents_can_produce_zero_overall() {
        // (1,2)+(-1,2) must collapse all the way to Scalar(0).
        let p = Poly::from_monomials(vec![mono(s(1), 2), mono(s(-1), 2)]);
        assert_eq!(p, Poly::zero());
    }

    #[test]
    fn degree_of_example_from_spec() {
        // ((1,2),3)+((1,0),1) -> outer sum has terms at exp 3 (coeff deg 2)
        // and exp 1 (coeff deg 0). Deg = max(2+3, 0+1) = 5.
        let inner_a = Poly::from_monomials(vec![mono(s(1), 2)]);
        let inner_b = s(1);
        let p = Poly::from_monomials(vec![mono(inner_a, 3), mono(inner_b, 1)]);
        assert_eq!(p.degree(), 5);
        assert_eq!(p.degree_by(0), 3);
        assert_eq!(p.degree_by(1), 2);
        assert_eq!(p.degree_by(2), 0);
    }

    #[test]
    fn add_zero_is_identity() {
        let p = Poly::from_monomials(vec![mono(s(1), 2), mono(s(2), 0)]);
        assert_eq!(add(&p, &Poly::zero()), p);
    }

    #[test]
    fn mul_one_is_identity_and_zero_absorbs() {
        let p = Poly::from_monomials(vec![mono(s(1), 2), mono(s(2), 0)]);
        assert_eq!(mul(&p, &s(1)), p);
        assert_eq!(mul(&p, &Poly::zero()), Poly::zero());
    }

    #[test]
    fn sub_matches_add_neg() {
        let p = Poly::from_monomials(vec![mono(s(3), 2), mono(s(-1), 1)]);
        let q = Poly::from_monomials(vec![mono(s(1), 1), mono(s(5), 0)]);
        assert_eq!(sub(&p, &q), add(&p, &neg(&q)));
    }

    #[test]
    fn mul_x_times_x_is_x_squared() {
        let x = Poly::from_monomials(vec![mono(s(1), 1)]);
        assert_eq!(mul(&x, &x).to_string(), "(1,2)");
    }

    #[test]
    fn at_example_from_spec() {
        // (2,2) evaluated at 3 -> 2 * 3^2 = 18
        let p = Poly::from_monomials(vec![mono(s(2), 2)]);
        assert_eq!(p.at(3), s(18));
    }

    #[test]
    fn at_zero_takes_constant_term() {
        let p = Poly::from_monomials(vec![mono(s(7), 0), mono(s(3), 2)]);
        assert_eq!(p.at(0), s(7));
        let q = Poly::from_monomials(vec![mono(s(3), 2)]);
        assert_eq!(q.at(0), Poly::zero());
    }

    #[test]
    fn compose_substitutes_x_with_one_plus_x() {
        // p = x (variable 0). qs = [1 + x]. compose(p, qs) = 1 + x.
        let p = Poly::from_monomials(vec![mono(s(1), 1)]);
        let one_plus_x = Poly::from_monomials(vec![mono(s(1), 0), mono(s(1), 1)]);
        let composed = p.compose(std::slice::from_ref(&one_plus_x));
        assert_eq!(composed, one_plus_x);
    }

    #[test]
    fn compose_empty_qs_uses_constant_term_chain() {
        // p = (1,0)+(1,1) in x_0. compose(p, []) replaces x_0 with 0, so the
        // result is the constant term: 1.
        let p = Poly::from_monomials(vec![mono(s(1), 0), mono(s(1), 1)]);
        assert_eq!(p.compose(&[]), s(1));
    }

    #[test]
    fn wraparound_on_overflow() {
        let p = s(i64::MAX);
        assert_eq!(add(&p, &s(1)), s(i64::MIN));
    }
}
