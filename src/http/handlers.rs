//! Route handlers.
//!
//! # Responsibilities
//! - Pull path parameters and the peer address out of the request
//! - Build the network definition and render its files
//! - Merge the files into a copy of the role's base config and return it
//!
//! # Design Decisions
//! - The address written into generated files is the TCP peer address;
//!   `X-Forwarded-For` and similar headers are ignored
//! - The role comes from the route the request matched, never from input
//! - Parameters that would escape the network-scripts directory or break
//!   the line structure of the file get the same 404 as an unknown path

use std::net::SocketAddr;

use axum::extract::rejection::PathRejection;
use axum::extract::{ConnectInfo, Path, State};
use axum::http::{header, Uri};
use axum::response::{IntoResponse, Response};
use axum::Extension;
use serde::Deserialize;

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::ignition::{IgnitionConfig, Role};
use crate::network::{caller_ip, BondSpec, NetworkInterfaceSpec};
use crate::render::{bond_files, interface_files};

#[derive(Debug, Deserialize)]
pub struct NicParams {
    pub nic: String,
    pub mask: String,
    pub gateway: String,
    pub dns: String,
}

#[derive(Debug, Deserialize)]
pub struct BondParams {
    pub bond: String,
    pub mask: String,
    pub gateway: String,
    pub dns: String,
    pub nic1: String,
    pub nic2: String,
}

/// `GET /{type}/nic/{nic}/{mask}/{gateway}/{dns}`
pub async fn nic(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    Extension(role): Extension<Role>,
    params: Result<Path<NicParams>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(params) = params?;
    let nic = NetworkInterfaceSpec::new(
        params.nic,
        caller_ip(peer.ip()),
        params.mask,
        params.gateway,
        params.dns,
    )?;

    tracing::debug!(role = %role, nic = %nic.name, ip = %nic.ip, "Generating interface config");

    let files = interface_files(&state.renderer, &state.embedder, &nic).await?;
    let config = state.store.augment(role, files);
    json_response(&config)
}

/// `GET /{type}/bond/{bond}/{mask}/{gateway}/{dns}/{nic1}/{nic2}`
pub async fn bond(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    Extension(role): Extension<Role>,
    params: Result<Path<BondParams>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(params) = params?;
    let bond = BondSpec::new(
        params.bond,
        caller_ip(peer.ip()),
        params.mask,
        params.gateway,
        params.dns,
    )?;
    let slaves = [bond.slave(params.nic1)?, bond.slave(params.nic2)?];

    tracing::debug!(
        role = %role,
        bond = %bond.name,
        slaves = ?[&slaves[0].name, &slaves[1].name],
        ip = %bond.ip,
        "Generating bond config"
    );

    let files = bond_files(&state.renderer, &state.embedder, &bond, &slaves).await?;
    let config = state.store.augment(role, files);
    json_response(&config)
}

/// `GET /status`: every registered route pattern, one per line.
pub async fn status(State(state): State<AppState>) -> String {
    state.routes.to_text()
}

/// Fallback for anything no route matched.
pub async fn not_found(uri: Uri) -> ApiError {
    tracing::debug!(path = %uri.path(), "No route matched");
    ApiError::NotFound
}

fn json_response(config: &IgnitionConfig) -> Result<Response, ApiError> {
    let body = serde_json::to_vec(config).map_err(ApiError::Serialization)?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
