//! Request/response data transfer objects
//!
//! Field names match the original service wire format: the carteira endpoint
//! speaks camelCase, the movimentações endpoint speaks the original
//! Portuguese snake_case. Decimals serialize as JSON numbers.

pub mod movement;
pub mod portfolio;
