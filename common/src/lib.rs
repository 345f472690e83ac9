//! Types shared between the classroom backend and its clients: the persisted
//! entities, the request payloads accepted by each endpoint and the JSON bodies
//! returned by them.

pub mod model;
pub mod requests;
pub mod responses;
