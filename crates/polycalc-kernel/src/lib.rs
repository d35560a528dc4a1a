//! Recursive sparse multivariate polynomial algebra over bounded integers.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                  PolyStack                   │
//! │   LIFO of Poly, the command executor's       │
//! │   immediate client                           │
//! └─────────────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────────┐
//! │                    Poly                      │
//! │   Scalar(i64) | Sum(Vec<Monomial>)            │
//! │   add, sub, neg, mul, at, compose, degree     │
//! └─────────────────────────────────────────────┘
//!                      ▲
//!                      │
//! ┌─────────────────────────────────────────────┐
//! │                  MonoBuf                      │
//! │   transient growable buffer used by parsing   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! `Poly` is a recursive tagged sum: every coefficient polynomial inside a
//! monomial is itself a `Poly`, one variable deeper. Every constructive
//! operation funnels through [`poly::Poly::from_monomials`], which sorts,
//! combines like exponents, drops zero terms, and applies the
//! single-scalar-monomial collapse rule — the canonical-form invariants are a
//! post-condition of every operation in this module, not something callers
//! must maintain by hand.

pub mod monobuf;
pub mod poly;
pub mod stack;

pub use monobuf::MonoBuf;
pub use poly::{is_canonical, Monomial, Poly};
pub use stack::PolyStack;
