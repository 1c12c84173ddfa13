//! Engine line protocol.
//!
//! Every request is a sequence of `\n`-terminated lines. Most values are
//! sent as a token line followed by a payload line whose fields are joined
//! with `|`. Numbers are rendered with [`fmt_number`], flags as `0`/`1`, and
//! nullable flags as `-1`/`0`/`1`.
//!
//! [`encode_submission`] produces the full text written for a job
//! submission; the request helpers in [`client`](crate::client) reuse
//! [`tokens`] for the shorter administrative requests.

mod encode;
mod frame;
pub mod tokens;

pub use encode::{encode_job, encode_scenario, encode_submission};
pub use frame::{flag, fmt_number, tristate, Fields, FrameWriter, Num};
