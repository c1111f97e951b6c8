//! Statistical distributions used by the inferential routines

pub mod special;
pub mod t;

pub use t::{t_cdf, t_critical, t_pdf, t_two_tailed_p};
