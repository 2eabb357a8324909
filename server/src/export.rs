use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::cadastro::{Cadastro, Disponibilidade};

/// The fixed column set of the exported spreadsheet.
pub const CSV_HEADERS: [&str; 8] = [
    "Nome Completo",
    "Idade",
    "Celular",
    "Motorista",
    "Disponibilidade",
    "Instrumento",
    "Congregação",
    "Data do Cadastro",
];

const DATA_BRASIL: &[FormatItem<'static>] = format_description!("[day]/[month]/[year]");
const DATA_ARQUIVO: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// The categories the listing view can narrow the collection to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Filtro {
    Todos,
    Motoristas,
    Ambos,
    Sabado,
    Domingo,
}

impl Filtro {
    /// Parses the name used by the listing view's filter buttons.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "todos" => Some(Filtro::Todos),
            "motoristas" => Some(Filtro::Motoristas),
            "ambos" => Some(Filtro::Ambos),
            "sabado" => Some(Filtro::Sabado),
            "domingo" => Some(Filtro::Domingo),
            _ => None,
        }
    }

    /// Whether the record belongs to this category. Non-destructive:
    /// filtering never touches the collection itself.
    pub fn matches(self, cadastro: &Cadastro) -> bool {
        match self {
            Filtro::Todos => true,
            Filtro::Motoristas => cadastro.dados.motorista,
            Filtro::Ambos => cadastro.dados.disponibilidade == Disponibilidade::Ambos,
            Filtro::Sabado => cadastro.dados.disponibilidade == Disponibilidade::Sabado,
            Filtro::Domingo => cadastro.dados.disponibilidade == Disponibilidade::Domingo,
        }
    }
}

/// Renders the records as UTF-8 CSV: a fixed header row, then one row
/// per record with text fields quoted, the driver flag as Sim/Não, the
/// availability as its label and the submission date in dd/mm/yyyy.
pub fn render_csv(cadastros: &[Cadastro]) -> String {
    let mut lines = Vec::with_capacity(cadastros.len() + 1);
    lines.push(CSV_HEADERS.join(","));

    for cadastro in cadastros {
        lines.push(format_row(cadastro));
    }

    lines.join("\n")
}

/// The attachment header for a download on the given day, e.g.
/// `attachment; filename="cadastros-missao-fraternal-2024-09-20.csv"`.
pub fn content_disposition(dia: Date) -> String {
    format!("attachment; filename=\"{}\"", filename(dia))
}

pub fn filename(dia: Date) -> String {
    format!(
        "cadastros-missao-fraternal-{}.csv",
        dia.format(&DATA_ARQUIVO).expect("format file date")
    )
}

fn format_row(cadastro: &Cadastro) -> String {
    let dados = &cadastro.dados;

    [
        quote(&dados.nome_completo),
        dados.idade.to_string(),
        quote(&dados.celular),
        sim_nao(dados.motorista).to_owned(),
        dados.disponibilidade.label().to_owned(),
        dados
            .instrumento
            .as_deref()
            .map(quote)
            .unwrap_or_default(),
        quote(&dados.congregacao),
        format_date(cadastro.data_cadastro),
    ]
    .join(",")
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

fn sim_nao(motorista: bool) -> &'static str {
    if motorista {
        "Sim"
    } else {
        "Não"
    }
}

fn format_date(data: OffsetDateTime) -> String {
    data.format(&DATA_BRASIL).expect("format submission date")
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;
    use uuid::Uuid;

    use crate::cadastro::{Cadastro, Disponibilidade, NovoCadastro};

    use super::*;

    fn ana_silva() -> Cadastro {
        Cadastro::new(
            Uuid::new_v4(),
            datetime!(2024-09-20 12:00 UTC),
            NovoCadastro {
                nome_completo: "Ana Silva".to_owned(),
                idade: 30,
                celular: "11999999999".to_owned(),
                motorista: true,
                disponibilidade: Disponibilidade::Sabado,
                instrumento: None,
                congregacao: "Centro".to_owned(),
            },
        )
    }

    #[test]
    fn renders_the_expected_row() {
        let csv = render_csv(&[ana_silva()]);
        let mut lines = csv.lines();

        assert_eq!(
            lines.next(),
            Some("Nome Completo,Idade,Celular,Motorista,Disponibilidade,Instrumento,Congregação,Data do Cadastro")
        );
        assert_eq!(
            lines.next(),
            Some("\"Ana Silva\",30,\"11999999999\",Sim,Sábado,,\"Centro\",20/09/2024")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn renders_non_drivers_and_instruments() {
        let mut cadastro = ana_silva();
        cadastro.dados.motorista = false;
        cadastro.dados.disponibilidade = Disponibilidade::Ambos;
        cadastro.dados.instrumento = Some("Violão".to_owned());

        let csv = render_csv(&[cadastro]);

        assert_eq!(
            csv.lines().nth(1),
            Some("\"Ana Silva\",30,\"11999999999\",Não,Ambos os dias,\"Violão\",\"Centro\",20/09/2024")
        );
    }

    #[test]
    fn doubles_embedded_quotes() {
        let mut cadastro = ana_silva();
        cadastro.dados.congregacao = "Jardim \"Novo\"".to_owned();

        let csv = render_csv(&[cadastro]);

        assert!(csv.contains("\"Jardim \"\"Novo\"\"\""));
    }

    #[test]
    fn filename_embeds_the_date() {
        assert_eq!(
            filename(datetime!(2024-09-20 12:00 UTC).date()),
            "cadastros-missao-fraternal-2024-09-20.csv"
        );
    }

    #[test]
    fn filters_select_exactly_their_category() {
        let motorista = ana_silva();
        let mut domingo = ana_silva();
        domingo.dados.motorista = false;
        domingo.dados.disponibilidade = Disponibilidade::Domingo;

        let cadastros = vec![motorista, domingo];

        let apenas_motoristas: Vec<_> = cadastros
            .iter()
            .filter(|c| Filtro::Motoristas.matches(c))
            .collect();
        assert_eq!(apenas_motoristas.len(), 1);
        assert!(apenas_motoristas[0].dados.motorista);

        let apenas_domingo: Vec<_> = cadastros
            .iter()
            .filter(|c| Filtro::Domingo.matches(c))
            .collect();
        assert_eq!(apenas_domingo.len(), 1);
        assert_eq!(
            apenas_domingo[0].dados.disponibilidade,
            Disponibilidade::Domingo
        );

        assert_eq!(cadastros.iter().filter(|c| Filtro::Todos.matches(c)).count(), 2);
    }
}
