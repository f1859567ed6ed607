//! Quill Core
//!
//! Core types for the Quill agent execution monitor.
//!
//! This crate contains:
//! - Domain types: Core entities (JobSession, LogEntry, DirectorySnapshot, etc.)
//! - DTOs: Data transfer objects for the document-generation backend API

pub mod domain;
pub mod dto;
