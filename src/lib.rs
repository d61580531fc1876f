//! # Newsroom 📰
//!
//! Client library and terminal front end for the Newsroom publishing backend.
//!
//! ## Overview
//!
//! Newsroom talks to a JSON REST backend where users publish articles,
//! comment, like, and ask an AI assistant for drafts and analytics. The
//! library holds the session token, funnels every request through one
//! façade, and keeps per-screen view state.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Screens                             │
//! │  Home · Article · Profile · Statistics · Assistant · Lists  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    API (ApiClient::call)                    │
//! │  auth · articles · comments · likes · users · ai            │
//! └─────────────────────────────────────────────────────────────┘
//!          │                   │                   │
//!          ▼                   ▼                   ▼
//! ┌─────────────────┐ ┌─────────────────┐ ┌─────────────────┐
//! │     Config      │ │     Session     │ │     Models      │
//! │                 │ │                 │ │                 │
//! │ • Base URL      │ │ • Bearer token  │ │ • Article       │
//! │ • Timeout       │ │ • Encrypted     │ │ • Comment, Like │
//! │ • Feed defaults │ │   token store   │ │ • User, AI      │
//! └─────────────────┘ └─────────────────┘ └─────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`api`]: Request façade and the backend operations
//! - [`config`]: Configuration management
//! - [`models`]: Records exchanged with the backend
//! - [`paths`]: Config and session file locations
//! - [`screens`]: Per-screen view state
//! - [`session`]: Token holder and persistent token store
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use newsroom::{ApiClient, Config, Session};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let config = Config::load()?;
//! let session = Arc::new(Session::open_default()?);
//! session.restore()?;
//!
//! let api = ApiClient::from_config(&config, session)?;
//! for article in api.list_articles().await? {
//!     println!("{} by {}", article.title, article.author());
//! }
//! # Ok(())
//! # }
//! ```

#![doc(html_root_url = "https://docs.rs/newsroom/0.1.0")]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::single_match_else)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::should_implement_trait)]
#![allow(clippy::return_self_not_must_use)]

pub mod api;
pub mod config;
pub mod models;
pub mod paths;
pub mod screens;
pub mod session;

// Re-export main types for convenience
pub use api::{ApiClient, ApiError, ErrorKind, RequestOptions};
pub use config::Config;
pub use models::{Article, ArticleDraft, Comment, User};
pub use session::{Session, SessionError};

/// ASCII logo for the application
pub const LOGO: &str = r"
  _  _
 | \| |_____ __ _____ _ _ ___  ___ _ __
 | .` / -_) V  V (_-<| '_/ _ \/ _ \ '  \
 |_|\_\___|\_/\_//__/|_| \___/\___/_|_|_|
";

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
