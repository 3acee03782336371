// MCP (Model Context Protocol) server exposing Vnstock market data
// as tools for agent clients (Claude Desktop, IDE agents, etc.)

pub mod config;
pub mod protocol;
pub mod server;
pub mod tools;

pub use config::ServerConfig;
pub use server::McpServer;
