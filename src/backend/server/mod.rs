//! Server Module
//!
//! This module contains the code that assembles the Axum application: its
//! configuration, its shared state and its initialization.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs      - Module exports and documentation
//! ├── state.rs    - AppState and FromRef implementations
//! ├── config.rs   - Configuration loading from the environment
//! ├── sessions.rs - SQLite session store and expired-session cleanup
//! └── init.rs     - Application creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `ServerConfig::from_env`
//! 2. **Workspace Root**: created along with the guest workspace
//! 3. **Sessions**: SQLite store opened, expired-session cleanup started
//! 4. **Identity**: OAuth clients for configured providers, identity resolver
//! 5. **Router Creation**: routes, session and identity middleware, CORS, tracing
//!
//! # Example
//!
//! ```rust,no_run
//! use flowspace::backend::server::{config::ServerConfig, create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(ServerConfig::from_env()?).await?;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Session storage
pub mod sessions;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use config::{ConfigError, ServerConfig};
pub use init::{build_app, create_app, InitError};
pub use state::AppState;
