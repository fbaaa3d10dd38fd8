// Composition root.
//
// Responsibilities
// - Read config from the environment.
// - Instantiate the in-memory store and the token authenticator.
// - Wire them into the command handlers, the live ticker and the GraphQL schema.
// - Expose the router served by main.rs.

pub mod config;
pub mod http;
pub mod seed;
pub mod state;
