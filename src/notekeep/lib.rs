//! # notekeep
//!
//! notekeep is the state core of a small note-taking editor: an ordered list
//! of notes with one active note, optional password locking of a note's text,
//! sidebar search, global formatting preferences, and persistence into a
//! `localStorage`-shaped key-value store. It renders nothing; a host UI drives
//! it and draws the state it exposes.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - NotesApi: the editor session controller                  │
//! │  - Persists after each mutation, turns errors into toasts   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure operations on the repository and formatting state   │
//! │  - Return CmdResult, never touch storage                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Repository (repository.rs) + Storage Layer (store/)        │
//! │  - Note list invariants, load-time upgrade of old records   │
//! │  - KeyValueStore trait: InMemoryStore, FileStore            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Locking is not encryption
//!
//! A locked note's text is XOR-ed with the password and base64-encoded (see
//! [`cipher`]). It keeps the text away from a glance at the storage, nothing
//! more. Anyone with the stored value can recover it.
//!
//! ## Module Overview
//!
//! - [`api`]: `NotesApi`, entry point for every user action
//! - [`commands`]: the operations themselves
//! - [`repository`]: the in-memory note list and its persistence
//! - [`store`]: storage port, key names, stored record schema
//! - [`model`]: `Note`, ids, title derivation
//! - [`cipher`]: lock/unlock transform
//! - [`formatting`]: global display preferences
//! - [`session`], [`dictation`], [`shortcuts`]: transient editor state and input mapping
//! - [`display`]: relative time labels
//! - [`config`]: tunable limits
//! - [`error`]: error types

pub mod api;
pub mod cipher;
pub mod commands;
pub mod config;
pub mod dictation;
pub mod display;
pub mod error;
pub mod formatting;
pub mod model;
pub mod repository;
pub mod session;
pub mod shortcuts;
pub mod store;
