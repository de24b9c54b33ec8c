//! Domain entities and wire DTOs
//!
//! Every record owned by the remote API carries a server-assigned `id` and
//! an `ativo` flag used for soft deletion. Field names follow the API's
//! Portuguese camelCase wire format via serde renames; missing optional
//! blocks deserialize to empty defaults so list payloads and detail
//! payloads share one struct.

use serde::{Deserialize, Serialize};

pub type EntityId = String;

/// Collection path segments, as the API exposes them.
pub mod collection {
    pub const USUARIO: &str = "usuario";
    pub const CLIENTE: &str = "cliente";
    pub const TIPO_PRODUTO: &str = "tipo-produto";
    pub const PRODUTO: &str = "produto";
    pub const MATERIA_PRIMA: &str = "materia-prima";
    pub const RECEITA: &str = "receita";
    pub const PRODUCAO: &str = "producao";
    pub const VENDEDOR: &str = "vendedor";
    pub const VENDA: &str = "venda";
}

// ============================================================================
// Entities
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Usuario {
    #[serde(default)]
    pub id: EntityId,
    pub nome: String,
    pub email: String,
    #[serde(default)]
    pub cargo: String,
    #[serde(default)]
    pub ativo: bool,
}

impl Usuario {
    /// Display label for the role code.
    pub fn cargo_label(&self) -> &str {
        match self.cargo.as_str() {
            "ADMIN" => "Administrador",
            _ => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Cliente {
    #[serde(default)]
    pub id: EntityId,
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub telefone: Option<String>,
    #[serde(default)]
    pub documento: Option<String>,
    #[serde(default)]
    pub ativo: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TipoProduto {
    #[serde(default)]
    pub id: EntityId,
    pub tipo: String,
    #[serde(default)]
    pub valor: f64,
    #[serde(default)]
    pub ativo: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Produto {
    #[serde(default)]
    pub id: EntityId,
    pub nome: String,
    #[serde(default)]
    pub estoque: f64,
    #[serde(default)]
    pub ativo: bool,
    #[serde(default)]
    pub tipo_produto: TipoProduto,
}

/// Measurement units for raw materials, as the API encodes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum UnidadeMedida {
    #[serde(rename = "QUILOGRAMA_KG")]
    QuilogramaKg,
    #[serde(rename = "GRAMA_G")]
    GramaG,
    #[serde(rename = "TONELADA_T")]
    ToneladaT,
    #[serde(rename = "LITRO_L")]
    LitroL,
    #[serde(rename = "MILILITRO_ML")]
    MililitroMl,
    #[default]
    #[serde(rename = "UNIDADE_UN")]
    UnidadeUn,
    #[serde(rename = "METRO_M")]
    MetroM,
    #[serde(rename = "CENTIMETRO_CM")]
    CentimetroCm,
    #[serde(rename = "PACOTE_PCT")]
    PacotePct,
}

impl UnidadeMedida {
    pub const ALL: [UnidadeMedida; 9] = [
        UnidadeMedida::QuilogramaKg,
        UnidadeMedida::GramaG,
        UnidadeMedida::ToneladaT,
        UnidadeMedida::LitroL,
        UnidadeMedida::MililitroMl,
        UnidadeMedida::UnidadeUn,
        UnidadeMedida::MetroM,
        UnidadeMedida::CentimetroCm,
        UnidadeMedida::PacotePct,
    ];

    /// Wire code sent to the API.
    pub fn code(&self) -> &'static str {
        match self {
            UnidadeMedida::QuilogramaKg => "QUILOGRAMA_KG",
            UnidadeMedida::GramaG => "GRAMA_G",
            UnidadeMedida::ToneladaT => "TONELADA_T",
            UnidadeMedida::LitroL => "LITRO_L",
            UnidadeMedida::MililitroMl => "MILILITRO_ML",
            UnidadeMedida::UnidadeUn => "UNIDADE_UN",
            UnidadeMedida::MetroM => "METRO_M",
            UnidadeMedida::CentimetroCm => "CENTIMETRO_CM",
            UnidadeMedida::PacotePct => "PACOTE_PCT",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|u| u.code() == code)
    }

    /// Full unit name for tables and reports.
    pub fn label(&self) -> &'static str {
        match self {
            UnidadeMedida::QuilogramaKg => "Quilograma",
            UnidadeMedida::GramaG => "Grama",
            UnidadeMedida::ToneladaT => "Tonelada",
            UnidadeMedida::LitroL => "Litro",
            UnidadeMedida::MililitroMl => "Mililitro",
            UnidadeMedida::UnidadeUn => "Unidade",
            UnidadeMedida::MetroM => "Metro",
            UnidadeMedida::CentimetroCm => "Centímetro",
            UnidadeMedida::PacotePct => "Pacote",
        }
    }

    /// Abbreviated form for the measurement-unit picker.
    pub fn abreviacao(&self) -> &'static str {
        match self {
            UnidadeMedida::QuilogramaKg => "Kg",
            UnidadeMedida::GramaG => "g",
            UnidadeMedida::ToneladaT => "t",
            UnidadeMedida::LitroL => "L",
            UnidadeMedida::MililitroMl => "ml",
            UnidadeMedida::UnidadeUn => "un",
            UnidadeMedida::MetroM => "m",
            UnidadeMedida::CentimetroCm => "cm",
            UnidadeMedida::PacotePct => "pct",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MateriaPrima {
    #[serde(default)]
    pub id: EntityId,
    pub nome: String,
    #[serde(default)]
    pub quantidade_estoque: f64,
    #[serde(default)]
    pub unidade_medida: UnidadeMedida,
    #[serde(default)]
    pub ativo: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReceitaMateriaPrima {
    #[serde(default)]
    pub id: EntityId,
    #[serde(rename = "quantidadeMP", default)]
    pub quantidade_mp: f64,
    #[serde(default)]
    pub materia_prima: MateriaPrima,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Receita {
    #[serde(default)]
    pub id: EntityId,
    #[serde(default)]
    pub ativo: bool,
    #[serde(default)]
    pub produto: Produto,
    #[serde(default)]
    pub receita_materia_prima: Vec<ReceitaMateriaPrima>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProducaoReceita {
    #[serde(default)]
    pub id: EntityId,
    #[serde(default)]
    pub quantidade_produzida: u32,
    #[serde(default)]
    pub receita: Receita,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Producao {
    #[serde(default)]
    pub id: EntityId,
    #[serde(default)]
    pub ativo: bool,
    /// Creation date, `dd/mm/yyyy`.
    #[serde(default)]
    pub data_atual: String,
    /// Expiry date, `dd/mm/yyyy`.
    #[serde(default)]
    pub vencimento: String,
    #[serde(default)]
    pub receita_producao_model: Vec<ProducaoReceita>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Vendedor {
    #[serde(default)]
    pub id: EntityId,
    pub nome: String,
    #[serde(default)]
    pub cpf: String,
    #[serde(default)]
    pub telefone: String,
    /// Commission as a fraction (`0.05` = 5%); forms edit it as a percentage.
    #[serde(default)]
    pub comissao: f64,
    #[serde(default)]
    pub ativo: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum VendaStatus {
    #[default]
    #[serde(rename = "OPENED")]
    Opened,
    #[serde(rename = "CLOSED")]
    Closed,
    #[serde(rename = "CANCELED")]
    Canceled,
}

impl VendaStatus {
    pub fn label(&self) -> &'static str {
        match self {
            VendaStatus::Opened => "Aberto",
            VendaStatus::Closed => "Fechado",
            VendaStatus::Canceled => "Cancelado",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProdutoVenda {
    #[serde(default)]
    pub id: EntityId,
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub referencia_produto: String,
    #[serde(default)]
    pub quantidade_saida: u32,
    #[serde(default)]
    pub quantidade_volta: u32,
    #[serde(default)]
    pub tipo: String,
    #[serde(default)]
    pub valor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Venda {
    #[serde(default)]
    pub id: EntityId,
    #[serde(default)]
    pub codigo: u64,
    /// Creation instant, epoch milliseconds.
    #[serde(default)]
    pub data_criacao: i64,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub status: VendaStatus,
    #[serde(default)]
    pub vendedor: Option<Vendedor>,
    #[serde(default)]
    pub cliente: Option<Cliente>,
    #[serde(default)]
    pub produto_venda: Vec<ProdutoVenda>,
}

// ============================================================================
// Auth payloads
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub senha: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoginResponse {
    pub token: String,
    pub usuario: Usuario,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub nome: String,
    pub email: String,
    pub senha: String,
    pub confirma_senha: String,
}

/// Profile persisted alongside the token in durable storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PerfilUsuario {
    pub nome: String,
    pub email: String,
    pub cargo: String,
}

impl From<&Usuario> for PerfilUsuario {
    fn from(u: &Usuario) -> Self {
        Self {
            nome: u.nome.clone(),
            email: u.email.clone(),
            cargo: u.cargo.clone(),
        }
    }
}

// ============================================================================
// Mutation payloads
// ============================================================================

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CountResponse {
    pub count: u64,
}

/// Error body the API attaches to failed mutations.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

/// Create/update body for sellers. `ativo` is omitted on create: the
/// server owns the initial flag.
#[derive(Debug, Clone, Serialize)]
pub struct VendedorPayload {
    pub nome: String,
    pub cpf: String,
    pub telefone: String,
    pub comissao: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ativo: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AtualizaUsuario {
    pub nome: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub senha: Option<String>,
    pub ativo: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TipoProdutoPayload {
    pub tipo: String,
    pub valor: f64,
    pub ativo: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProdutoPayload {
    pub nome: String,
    pub estoque: f64,
    pub ativo: bool,
    pub tipo_produto_id: EntityId,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MateriaPrimaPayload {
    pub nome: String,
    pub quantidade_estoque: f64,
    pub unidade_medida: UnidadeMedida,
    pub ativo: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientePayload {
    pub nome: String,
    pub telefone: String,
    pub documento: String,
    pub ativo: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct NovaReceitaLinha {
    #[serde(rename = "materiaPrima_id")]
    pub materia_prima_id: EntityId,
    pub quantidade: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct NovaReceita {
    pub produto_id: EntityId,
    #[serde(rename = "receitaMateriaPrimaList")]
    pub receita_materia_prima_list: Vec<NovaReceitaLinha>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProducaoLinha {
    pub receita_id: EntityId,
    pub quantidade: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NovaProducao {
    pub data_atual: String,
    pub vencimento: String,
    pub receita: Vec<ProducaoLinha>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AtualizaProducao {
    pub vencimento: String,
    pub ativo: bool,
    pub receita: Vec<ProducaoLinha>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NovaVendaLinha {
    #[serde(rename = "productId")]
    pub product_id: EntityId,
    pub quantidade_saida: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NovaVenda {
    pub vendedor_id: EntityId,
    pub produto_venda: Vec<NovaVendaLinha>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FechaVendaLinha {
    pub produto_venda_id: EntityId,
    pub quantidade_volta: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FechaVenda {
    pub produtos_venda: Vec<FechaVendaLinha>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_materia_prima_wire_format() {
        let json = r#"{
            "id": "7",
            "nome": "Açúcar",
            "quantidadeEstoque": 12.5,
            "unidadeMedida": "QUILOGRAMA_KG",
            "ativo": true
        }"#;
        let mp: MateriaPrima = serde_json::from_str(json).unwrap();
        assert_eq!(mp.quantidade_estoque, 12.5);
        assert_eq!(mp.unidade_medida, UnidadeMedida::QuilogramaKg);

        let back = serde_json::to_value(&mp).unwrap();
        assert_eq!(back["quantidadeEstoque"], 12.5);
        assert_eq!(back["unidadeMedida"], "QUILOGRAMA_KG");
    }

    #[test]
    fn test_venda_deserializes_partial_payload() {
        // List payloads omit nested blocks the detail endpoint includes.
        let json = r#"{"id": "3", "codigo": 12, "dataCriacao": 1700000000000,
                       "total": 99.9, "status": "OPENED"}"#;
        let venda: Venda = serde_json::from_str(json).unwrap();
        assert_eq!(venda.status, VendaStatus::Opened);
        assert!(venda.vendedor.is_none());
        assert!(venda.produto_venda.is_empty());
    }

    #[test]
    fn test_receita_payload_field_names() {
        let body = NovaReceita {
            produto_id: "p1".into(),
            receita_materia_prima_list: vec![NovaReceitaLinha {
                materia_prima_id: "m1".into(),
                quantidade: 2.0,
            }],
        };
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("produto_id").is_some());
        let linha = &value["receitaMateriaPrimaList"][0];
        assert_eq!(linha["materiaPrima_id"], "m1");
        assert_eq!(linha["quantidade"], 2.0);
    }

    #[test]
    fn test_fecha_venda_payload_field_names() {
        let body = FechaVenda {
            produtos_venda: vec![FechaVendaLinha {
                produto_venda_id: "pv1".into(),
                quantidade_volta: 3,
            }],
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["produtosVenda"][0]["produtoVendaId"], "pv1");
        assert_eq!(value["produtosVenda"][0]["quantidadeVolta"], 3);
    }

    #[test]
    fn test_unidade_medida_codes_round_trip() {
        for unidade in UnidadeMedida::ALL {
            assert_eq!(UnidadeMedida::from_code(unidade.code()), Some(unidade));
        }
        assert_eq!(UnidadeMedida::from_code("FURLONG"), None);
    }

    #[test]
    fn test_vendedor_payload_shapes() {
        let create = VendedorPayload {
            nome: "Ana".into(),
            cpf: "52998224725".into(),
            telefone: "11987654321".into(),
            comissao: 0.05,
            ativo: None,
        };
        let value = serde_json::to_value(&create).unwrap();
        // Create bodies carry neither an id nor the soft-delete flag.
        assert!(value.get("id").is_none());
        assert!(value.get("ativo").is_none());

        let update = VendedorPayload {
            ativo: Some(false),
            ..create
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value["ativo"], false);
        assert!(value.get("id").is_none());
    }
}
