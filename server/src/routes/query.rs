use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub filtro: Option<String>,
}
