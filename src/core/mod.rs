//! # Core Application Logic
//!
//! This module contains slacky's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • dispatch() (effects) │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │  Backend   │
//!     │  Adapter   │                          │  (Slack)   │
//!     │ (ratatui)  │                          │            │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`dispatch`]: Runs actions and the backend effects they request
//! - [`directory`], [`selection`], [`transcript`], [`line_editor`]: the models
//!   `App` is made of
//! - [`config`]: Settings resolution

pub mod action;
pub mod config;
pub mod directory;
pub mod dispatch;
pub mod line_editor;
pub mod selection;
pub mod state;
pub mod transcript;
