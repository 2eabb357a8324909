use serde::Serialize;
use serde_json::Value;

use crate::cadastro::{Disponibilidade, NovoCadastro};
use crate::normalization::normalize_text;

const NOME_MUITO_CURTO: &str = "Nome deve ter pelo menos 3 caracteres";
const IDADE_OBRIGATORIA: &str = "Idade é obrigatória";
const IDADE_INVALIDA: &str = "Idade inválida";
const CELULAR_MUITO_CURTO: &str = "Celular deve ter pelo menos 10 dígitos";
const MOTORISTA_OBRIGATORIO: &str = "Motorista é obrigatório";
const DISPONIBILIDADE_INVALIDA: &str = "Disponibilidade inválida";
const INSTRUMENTO_INVALIDO: &str = "Instrumento inválido";
const CONGREGACAO_OBRIGATORIA: &str = "Congregação é obrigatória";

/// One violated field constraint, reported to the caller verbatim.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Violation {
    pub field: &'static str,
    pub message: &'static str,
}

impl Violation {
    fn new(field: &'static str, message: &'static str) -> Self {
        Violation { field, message }
    }
}

/// Checks an arbitrary JSON payload against the registration schema.
///
/// Every violated field is reported, so a payload with a short name
/// and a bad age produces two violations. Unknown extra fields are
/// ignored; text fields are normalized before their constraints are
/// checked. This never fails with anything other than the violation
/// list.
pub fn validate(payload: &Value) -> Result<NovoCadastro, Vec<Violation>> {
    let mut violations = vec![];

    let nome_completo = match payload.get("nomeCompleto").and_then(Value::as_str) {
        Some(nome) => {
            let nome = normalize_text(nome);

            if nome.chars().count() >= 3 {
                Some(nome)
            } else {
                violations.push(Violation::new("nomeCompleto", NOME_MUITO_CURTO));
                None
            }
        }
        None => {
            violations.push(Violation::new("nomeCompleto", NOME_MUITO_CURTO));
            None
        }
    };

    let idade = match payload.get("idade") {
        Some(valor) if valor.is_number() => match valor.as_i64() {
            Some(idade) if idade < 1 => {
                violations.push(Violation::new("idade", IDADE_OBRIGATORIA));
                None
            }
            Some(idade) if idade <= 120 => Some(idade as u8),
            // Too old, or a fractional number.
            _ => {
                violations.push(Violation::new("idade", IDADE_INVALIDA));
                None
            }
        },
        _ => {
            violations.push(Violation::new("idade", IDADE_OBRIGATORIA));
            None
        }
    };

    let celular = match payload.get("celular").and_then(Value::as_str) {
        Some(celular) => {
            let celular = normalize_text(celular);

            if celular.chars().count() >= 10 {
                Some(celular)
            } else {
                violations.push(Violation::new("celular", CELULAR_MUITO_CURTO));
                None
            }
        }
        None => {
            violations.push(Violation::new("celular", CELULAR_MUITO_CURTO));
            None
        }
    };

    let motorista = match payload.get("motorista").and_then(Value::as_bool) {
        Some(motorista) => Some(motorista),
        None => {
            violations.push(Violation::new("motorista", MOTORISTA_OBRIGATORIO));
            None
        }
    };

    let disponibilidade = match payload
        .get("disponibilidade")
        .and_then(Value::as_str)
        .and_then(Disponibilidade::from_name)
    {
        Some(disponibilidade) => Some(disponibilidade),
        None => {
            violations.push(Violation::new("disponibilidade", DISPONIBILIDADE_INVALIDA));
            None
        }
    };

    // Optional: absent, null or blank all mean "not provided".
    let mut instrumento = None;
    match payload.get("instrumento") {
        None | Some(Value::Null) => {}
        Some(Value::String(valor)) => {
            let valor = normalize_text(valor);

            if !valor.is_empty() {
                instrumento = Some(valor);
            }
        }
        Some(_) => violations.push(Violation::new("instrumento", INSTRUMENTO_INVALIDO)),
    }

    let congregacao = match payload.get("congregacao").and_then(Value::as_str) {
        Some(congregacao) => {
            let congregacao = normalize_text(congregacao);

            if !congregacao.is_empty() {
                Some(congregacao)
            } else {
                violations.push(Violation::new("congregacao", CONGREGACAO_OBRIGATORIA));
                None
            }
        }
        None => {
            violations.push(Violation::new("congregacao", CONGREGACAO_OBRIGATORIA));
            None
        }
    };

    match (
        nome_completo,
        idade,
        celular,
        motorista,
        disponibilidade,
        congregacao,
    ) {
        (
            Some(nome_completo),
            Some(idade),
            Some(celular),
            Some(motorista),
            Some(disponibilidade),
            Some(congregacao),
        ) if violations.is_empty() => Ok(NovoCadastro {
            nome_completo,
            idade,
            celular,
            motorista,
            disponibilidade,
            instrumento,
            congregacao,
        }),
        _ => Err(violations),
    }
}
