//! Designer Domain Library
//!
//! Core domain types and interfaces for the AI system designer.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (Design, PromptSet)
//!   - `services/`: Prompt composition, reply parsing, lineage walking
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Record and prompt document access
//!   - `services/`: External text-generation backend
//!
//! # Usage
//!
//! ```rust,ignore
//! use designer::domain::{Design, PromptKind};
//! use designer::ports::{DesignRepository, LlmProvider};
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{lineage, Design, DesignMap, DomainError, GenerationClient, PromptKind, PromptSet};
pub use ports::{
    CompletionResponse, DesignRepository, LlmProvider, PromptRepository, TokenUsage,
};
