//! # Dashboard Commands
//!
//! Handlers behind every dashboard action.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── crud.rs     ◄─── create / read / update / delete
//! ├── catalog.rs  ◄─── browse screen, genre list
//! ├── report.rs   ◄─── top developers, free apps, top rated
//! └── status.rs   ◄─── database diagnostics
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  main.rs parses argv ──► handler(&Database, request)                   │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │                 Result<T: Serialize, ApiError>                          │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │                 render::* (text)  or  render::to_json                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Handlers never print; rendering is the caller's job.

pub mod catalog;
pub mod crud;
pub mod report;
pub mod status;
