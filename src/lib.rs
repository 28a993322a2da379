//! pressroom: core of a content-ingestion-and-publishing pipeline.
//!
//! Two cooperating subsystems:
//!
//! - [`pipeline`]: the in-memory state machine tracking one job through the
//!   fixed 8-stage publishing topology, with weighted overall progress and a
//!   synchronous observer interface.
//! - [`formatter`]: the deterministic article-formatting processor, an
//!   ordered sequence of HTML rewrite passes driven by user settings and a
//!   static template registry.
//!
//! The [`runner`] module drives a job through the topology via registered
//! per-stage executors, retrying transient failures with backoff. All
//! external SaaS work (storage, AI rewriting, publishing) lives behind the
//! `StageExecutor` seam and is out of scope here.

pub mod config;
pub mod formatter;
pub mod pipeline;
pub mod runner;
