//! Mission-Pizza tool agent
//!
//! Turns the backend's OpenAPI document into callable tools and drives them
//! from a step-by-step wizard or from tool-calling LLM agents.
//!
//! - [`openapi`]: schema extraction and the OpenAPI to tool transformer
//! - [`tools`]: tool definitions, argument binding and the registry
//! - [`backend`]: HTTP client and handlers for the backend operations
//! - [`factory`]: assembles a registry from a document and the handlers
//! - [`llm`], [`agent`], [`orchestrator`]: chat backends, agents, workflow
//! - [`cli`], [`handlers`]: the `pizza` command line

pub mod agent;
pub mod backend;
pub mod cli;
pub mod config;
pub mod factory;
pub mod handlers;
pub mod llm;
pub mod openapi;
pub mod orchestrator;
pub mod tools;
