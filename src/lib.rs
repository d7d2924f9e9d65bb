//! envmint: detect, validate, score, and sync `.env` files against a
//! template such as `.env.example`.

pub mod detector;
pub mod formatter;
pub mod git_check;
pub mod parser;
pub mod sync;
pub mod validator;
