//! # TUI Components
//!
//! All UI components for the terminal interface. Each one is a transient
//! wrapper built every frame from borrowed core state ("props") and
//! rendered through the `Component` trait:
//!
//! - `TitleBar`: app name and status message
//! - `ContactList`: numbered conversations inside the selection window
//! - `TranscriptView`: the open conversation's rows
//! - `InputBox`: the line being typed, with the terminal cursor
//!
//! Components never reach into global state; whatever they draw is passed
//! in, which keeps them testable against `TestBackend`.
//!
//! ```text
//! components/
//! ├── mod.rs              (this file)
//! ├── title_bar.rs
//! ├── contact_list.rs
//! ├── transcript_view.rs
//! └── input_box.rs
//! ```

pub mod contact_list;
pub mod input_box;
pub mod title_bar;
pub mod transcript_view;

pub use contact_list::ContactList;
pub use input_box::InputBox;
pub use title_bar::TitleBar;
pub use transcript_view::TranscriptView;
