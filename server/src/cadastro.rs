use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// A single registration in the store.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Cadastro {
    /// The ID of the registration.
    pub(crate) id: Uuid,

    /// The user-submitted data.
    #[serde(flatten)]
    pub(crate) dados: NovoCadastro,

    /// The date and time it was submitted. Never changes afterwards.
    #[serde(rename = "dataCadastro", with = "time::serde::rfc3339")]
    pub(crate) data_cadastro: OffsetDateTime,
}

impl Cadastro {
    pub fn new(id: Uuid, data_cadastro: OffsetDateTime, dados: NovoCadastro) -> Self {
        Cadastro {
            id,
            dados,
            data_cadastro,
        }
    }

    /// Stamps a validated submission with a fresh ID and the current
    /// time, making it a full registration.
    pub fn create(dados: NovoCadastro) -> Self {
        Self::new(Uuid::new_v4(), OffsetDateTime::now_utc(), dados)
    }

    pub fn id(&self) -> &Uuid {
        &self.id
    }
}

/// A validated submission, before an ID and timestamp are assigned.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NovoCadastro {
    /// The full name provided.
    pub(crate) nome_completo: String,

    /// The age provided.
    pub(crate) idade: u8,

    /// The mobile/WhatsApp number provided.
    pub(crate) celular: String,

    /// Whether the volunteer can drive.
    pub(crate) motorista: bool,

    /// The days the volunteer is available.
    pub(crate) disponibilidade: Disponibilidade,

    /// The instrument played, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) instrumento: Option<String>,

    /// The congregation the volunteer belongs to.
    pub(crate) congregacao: String,
}

/// The days of the event a volunteer is available for.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Disponibilidade {
    Ambos,
    Sabado,
    Domingo,
}

impl Disponibilidade {
    /// Parses the wire name used by the form.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ambos" => Some(Disponibilidade::Ambos),
            "sabado" => Some(Disponibilidade::Sabado),
            "domingo" => Some(Disponibilidade::Domingo),
            _ => None,
        }
    }

    /// The human-readable label shown in listings and exports.
    pub fn label(self) -> &'static str {
        match self {
            Disponibilidade::Ambos => "Ambos os dias",
            Disponibilidade::Sabado => "Sábado",
            Disponibilidade::Domingo => "Domingo",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_wire_names() {
        let cadastro = Cadastro::create(NovoCadastro {
            nome_completo: "Ana Silva".to_owned(),
            idade: 30,
            celular: "11999999999".to_owned(),
            motorista: true,
            disponibilidade: Disponibilidade::Sabado,
            instrumento: None,
            congregacao: "Centro".to_owned(),
        });

        let value = serde_json::to_value(&cadastro).expect("serialize cadastro");

        assert_eq!(value["nomeCompleto"], "Ana Silva");
        assert_eq!(value["idade"], 30);
        assert_eq!(value["motorista"], true);
        assert_eq!(value["disponibilidade"], "sabado");
        assert!(value.get("instrumento").is_none());
        assert!(value["id"].is_string());
        assert!(value["dataCadastro"].is_string());
    }

    #[test]
    fn round_trips_through_json() {
        let original = Cadastro::create(NovoCadastro {
            nome_completo: "João Pereira".to_owned(),
            idade: 45,
            celular: "21988887777".to_owned(),
            motorista: false,
            disponibilidade: Disponibilidade::Ambos,
            instrumento: Some("Violino".to_owned()),
            congregacao: "Vila Nova".to_owned(),
        });

        let json = serde_json::to_string(&original).expect("serialize cadastro");
        let parsed: Cadastro = serde_json::from_str(&json).expect("parse cadastro");

        assert_eq!(parsed.id, original.id);
        assert_eq!(parsed.data_cadastro, original.data_cadastro);
        assert_eq!(parsed.dados.instrumento.as_deref(), Some("Violino"));
        assert_eq!(parsed.dados.disponibilidade, Disponibilidade::Ambos);
    }

    #[test]
    fn created_registrations_get_unique_ids() {
        let dados = NovoCadastro {
            nome_completo: "Maria Souza".to_owned(),
            idade: 20,
            celular: "11911112222".to_owned(),
            motorista: false,
            disponibilidade: Disponibilidade::Domingo,
            instrumento: None,
            congregacao: "Centro".to_owned(),
        };

        let first = Cadastro::create(dados.clone());
        let second = Cadastro::create(dados);

        assert_ne!(first.id, second.id);
    }
}
