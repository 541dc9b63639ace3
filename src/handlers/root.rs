//! Root handler - service identity and endpoint directory

use axum::Json;
use serde_json::{json, Value};

pub async fn index() -> Json<Value> {
    Json(json!({
        "message": "API de prédiction de risque de crédit",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "/health": "Vérifier l'état de l'API",
            "/predict": "Faire une prédiction",
            "/model-info": "Informations sur le modèle"
        }
    }))
}
