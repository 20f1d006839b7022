//! `{data, meta}` bodies for successful API calls. The client parses the same shape.

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ListMeta>,
}

/// Only list responses carry it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListMeta {
    pub count: usize,
}

pub type Reply<T> = (StatusCode, Json<Envelope<T>>);

fn reply<T: Serialize>(status: StatusCode, data: T, meta: Option<ListMeta>) -> Reply<T> {
    (status, Json(Envelope { data, meta }))
}

/// 201, for registrations.
pub fn success_one<T: Serialize>(data: T) -> Reply<T> {
    reply(StatusCode::CREATED, data, None)
}

pub fn success_one_ok<T: Serialize>(data: T) -> Reply<T> {
    reply(StatusCode::OK, data, None)
}

pub fn success_many<T: Serialize>(data: Vec<T>) -> Reply<Vec<T>> {
    let meta = ListMeta { count: data.len() };
    reply(StatusCode::OK, data, Some(meta))
}
