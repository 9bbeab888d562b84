//! The web app manifest, served at `/manifest.json`.
//!
//! The manifest lets mobile browsers install the app to the home screen
//! with an Indonesian name, brand colours and an add-transaction shortcut.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::endpoints;

#[derive(Serialize)]
struct Manifest {
    name: &'static str,
    short_name: &'static str,
    description: &'static str,
    start_url: &'static str,
    display: &'static str,
    background_color: &'static str,
    theme_color: &'static str,
    scope: &'static str,
    categories: [&'static str; 2],
    lang: &'static str,
    dir: &'static str,
    orientation: &'static str,
    icons: [Icon; 2],
    shortcuts: [Shortcut; 1],
}

#[derive(Serialize)]
struct Icon {
    src: &'static str,
    sizes: &'static str,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    image_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    purpose: Option<&'static str>,
}

#[derive(Serialize)]
struct Shortcut {
    name: &'static str,
    short_name: &'static str,
    description: &'static str,
    url: &'static str,
    icons: [Icon; 1],
}

const MANIFEST: Manifest = Manifest {
    name: "FinTrack Lite",
    short_name: "FinTrack",
    description: "Pelacakan keuangan sederhana dengan wawasan AI.",
    start_url: endpoints::ROOT,
    display: "standalone",
    background_color: "#F9FAFB",
    theme_color: "#2A9DF4",
    scope: endpoints::ROOT,
    categories: ["finance", "productivity"],
    lang: "id",
    dir: "ltr",
    orientation: "portrait-primary",
    icons: [
        Icon {
            src: "/static/icon-192x192.png",
            sizes: "192x192",
            image_type: Some("image/png"),
            purpose: Some("maskable"),
        },
        Icon {
            src: "/static/icon-512x512.png",
            sizes: "512x512",
            image_type: Some("image/png"),
            purpose: Some("maskable"),
        },
    ],
    shortcuts: [Shortcut {
        name: "Tambah Transaksi",
        short_name: "Tambah",
        description: "Tambah transaksi baru",
        url: endpoints::NEW_TRANSACTION_VIEW,
        icons: [Icon {
            src: "/static/icon-192x192.png",
            sizes: "192x192",
            image_type: None,
            purpose: None,
        }],
    }],
};

/// Serve the web app manifest.
pub async fn get_manifest() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/manifest+json")],
        Json(MANIFEST),
    )
        .into_response()
}
