//! Tickdesk Tickets — the ticket lifecycle service.
//!
//! All mutation rules live here: validation, policy enforcement,
//! assignment checks, and comment snapshots. The HTTP layer stays a
//! thin translation over this service.

pub mod service;

pub use service::{NewTicket, TicketService};
