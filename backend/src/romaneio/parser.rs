use super::ReportParser;
use crate::error::{AppError, AppResult};
use common::model::romaneio::{RomaneioHeader, RomaneioProduct, RomaneioRecord};
use log::debug;
use regex::Regex;

/// Customer label used when a block has no `... - VID.` line.
pub const CUSTOMER_NOT_FOUND: &str = "Customer not found";

const HEADER_FIELDS: usize = 9;

/// Layout heuristics for the romaneio report.
#[derive(Debug, Clone)]
pub struct RomaneioParser {
    block_marker: Regex,
    customer: Regex,
    header: Regex,
    field_gap: Regex,
    product_section: Regex,
    product: Regex,
}

fn compile(pattern: &str) -> AppResult<Regex> {
    Regex::new(pattern).map_err(|e| AppError::Internal(format!("Regex error: {}", e)))
}

impl RomaneioParser {
    pub fn new() -> AppResult<Self> {
        Ok(Self {
            block_marker: compile(r"(?i)Pedido\s+Pedido Cli\.")?,
            customer: compile(r"\n([A-Z\s\d\.\-]+-\s*VID\..*?)\n")?,
            header: compile(
                r"(?is)Tipo\s+Funcionário\s+Data Pedido\s+Data Entrega\s+Peso\s+m²\s+Total\n(.*?)\n",
            )?,
            field_gap: compile(r"\s{2,}")?,
            product_section: compile(r"(?is)Cod\s+Produto\s+LarguraxAltura(.*?)Resumo:")?,
            product: compile(r"(?s)(\d{4,})\s+(.*?)\s+OS:(\d+)\s+(\d+x\d+)\s+(\d+)\s+([\d,]+)")?,
        })
    }

    fn customer_name(&self, block: &str) -> String {
        self.customer
            .captures(block)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_else(|| CUSTOMER_NOT_FOUND.to_string())
    }

    fn header(&self, block: &str, customer: String) -> Option<RomaneioHeader> {
        let line = self.header.captures(block)?.get(1)?.as_str().trim();
        let values: Vec<&str> = self.field_gap.split(line).collect();
        if values.len() < HEADER_FIELDS {
            debug!(
                "Skipping romaneio block: header has {} field(s)",
                values.len()
            );
            return None;
        }
        Some(RomaneioHeader {
            order_number: values[0].to_string(),
            client_order_ref: values[1].to_string(),
            order_type: values[2].to_string(),
            employee: values[3].to_string(),
            order_date: values[4].to_string(),
            delivery_date: values[5].to_string(),
            weight: values[6].to_string(),
            area: values[7].to_string(),
            total: values[8].to_string(),
            customer,
        })
    }

    fn products(&self, block: &str) -> Vec<RomaneioProduct> {
        let Some(section) = self.product_section.captures(block).and_then(|c| c.get(1)) else {
            return Vec::new();
        };
        self.product
            .captures_iter(section.as_str())
            .map(|caps| RomaneioProduct {
                code: caps[1].trim().to_string(),
                description: caps[2].replace('\n', " ").trim().to_string(),
                os_number: caps[3].trim().to_string(),
                dimensions: caps[4].trim().to_string(),
                quantity: caps[5].trim().to_string(),
                area: caps[6].trim().to_string(),
            })
            .collect()
    }
}

impl ReportParser for RomaneioParser {
    fn parse(&self, text: &str) -> Vec<RomaneioRecord> {
        self.block_marker
            .split(text)
            .skip(1)
            .filter_map(|block| {
                let customer = self.customer_name(block);
                let header = self.header(block, customer)?;
                Some(RomaneioRecord {
                    header,
                    products: self.products(block),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TITLES: &str =
        "Pedido  Pedido Cli.  Tipo  Funcionário  Data Pedido  Data Entrega  Peso  m²  Total\n";

    fn report() -> String {
        let mut text = String::from("ROMANEIO DE ENTREGA\nEmitido em 10/02/2024\n");

        text.push_str(TITLES);
        text.push_str("1001  PC-77  Venda  JOAO  01/02/2024  05/02/2024  120,5  10,25  1.500,00\n");
        text.push_str("CONSTRUTORA ALFA LTDA - VID. 123\n");
        text.push_str("Cod  Produto  LarguraxAltura  Qtde  m²\n");
        text.push_str("1234 VIDRO TEMPERADO 8MM OS:5566 1000x2000 2 4,00\n");
        text.push_str("56789 ESPELHO\nBISOTADO OS:42 500x600 1 0,30\n");
        text.push_str("Resumo: 2 itens\n");

        text.push_str(TITLES);
        text.push_str("1002  PC-78  Venda  JOAO\n");
        text.push_str("VIDRACARIA BETA - VID. 9\n");

        text.push_str(TITLES);
        text.push_str("1003  PC-90  Troca  MARIA  03/02/2024  06/02/2024  8,0  1,00  90,00\n");
        text.push_str("sem cliente\n");
        text
    }

    #[test]
    fn parses_well_formed_blocks_in_order() {
        let records = RomaneioParser::new().unwrap().parse(&report());
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.header.order_number, "1001");
        assert_eq!(first.header.client_order_ref, "PC-77");
        assert_eq!(first.header.order_type, "Venda");
        assert_eq!(first.header.delivery_date, "05/02/2024");
        assert_eq!(first.header.total, "1.500,00");
        assert_eq!(first.header.customer, "CONSTRUTORA ALFA LTDA - VID. 123");
        assert_eq!(
            first.products,
            vec![
                RomaneioProduct {
                    code: "1234".to_string(),
                    description: "VIDRO TEMPERADO 8MM".to_string(),
                    os_number: "5566".to_string(),
                    dimensions: "1000x2000".to_string(),
                    quantity: "2".to_string(),
                    area: "4,00".to_string(),
                },
                RomaneioProduct {
                    code: "56789".to_string(),
                    description: "ESPELHO BISOTADO".to_string(),
                    os_number: "42".to_string(),
                    dimensions: "500x600".to_string(),
                    quantity: "1".to_string(),
                    area: "0,30".to_string(),
                },
            ]
        );

        let last = &records[1];
        assert_eq!(last.header.order_number, "1003");
        assert_eq!(last.header.customer, CUSTOMER_NOT_FOUND);
        assert!(last.products.is_empty());
    }

    #[test]
    fn text_without_markers_yields_nothing() {
        let parser = RomaneioParser::new().unwrap();
        assert!(parser.parse("Relatório vazio\nsem pedidos\n").is_empty());
        assert!(parser.parse("").is_empty());
    }

    #[test]
    fn marker_is_case_insensitive() {
        let text = format!(
            "pedido  PEDIDO CLI.  Tipo  Funcionário  Data Pedido  Data Entrega  Peso  m²  Total\n{}",
            "7  X  Venda  ANA  01/01/2024  02/01/2024  1  1  1\n"
        );
        let records = RomaneioParser::new().unwrap().parse(&text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].header.order_number, "7");
    }
}
