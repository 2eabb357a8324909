use serde::Serialize;

use crate::cadastro::Cadastro;

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SuccessResponse<'a> {
    Created {
        success: bool,
        message: &'a str,
        data: Cadastro,
    },
    Listing {
        message: &'a str,
        version: &'a str,
        #[serde(rename = "totalCadastros")]
        total_cadastros: usize,
        environment: &'a str,
        cadastros: Vec<Cadastro>,
    },
    Healthz {
        revision: Option<&'a str>,
        timestamp: Option<&'a str>,
        version: &'a str,
    },
}
