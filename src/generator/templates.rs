// file: src/generator/templates.rs
// description: localized label dictionaries for the sample document templates
// reference: static lookup tables keyed by language

use crate::models::Language;

pub struct InvoiceLabels {
    pub title: &'static str,
    pub invoice_number: &'static str,
    pub date: &'static str,
    pub due_date: &'static str,
    pub bill_to: &'static str,
    pub description: &'static str,
    pub quantity: &'static str,
    pub unit_price: &'static str,
    pub total: &'static str,
    pub subtotal: &'static str,
    pub tax: &'static str,
    pub grand_total: &'static str,
    pub payment_terms: &'static str,
    pub thank_you: &'static str,
    pub company: &'static str,
    /// (description, quantity, unit price)
    pub items: [(&'static str, u32, f64); 4],
}

pub struct RoyaltyLabels {
    pub title: &'static str,
    pub period: &'static str,
    pub territory: &'static str,
    pub recipient: &'static str,
    pub title_col: &'static str,
    pub units: &'static str,
    pub rate: &'static str,
    pub amount: &'static str,
    pub total_royalties: &'static str,
    pub payment_date: &'static str,
    pub company: &'static str,
    pub territories: [&'static str; 4],
}

pub struct ContractLabels {
    pub title: &'static str,
    pub parties: &'static str,
    pub party_a: &'static str,
    pub party_b: &'static str,
    pub effective_date: &'static str,
    pub term: &'static str,
    pub territory: &'static str,
    pub consideration: &'static str,
    pub terms_title: &'static str,
    pub signature: &'static str,
    pub terms: [&'static str; 6],
}

/// Languages with a dedicated dictionary. Others render in English.
pub const TEMPLATE_LANGUAGES: [Language; 4] =
    [Language::En, Language::Es, Language::De, Language::Pt];

pub fn has_template(lang: Language) -> bool {
    TEMPLATE_LANGUAGES.contains(&lang)
}

pub const COMPANY_ADDRESS: &str = "123 Media Boulevard, Los Angeles, CA 90028";
pub const CLIENT_ADDRESS: [&str; 2] = ["456 Entertainment Way", "Beverly Hills, CA 90210"];

pub const CLIENTS: [&str; 4] = [
    "Global Studios Inc",
    "MediaTech Solutions",
    "Film Finance Co",
    "Creative Partners LLC",
];

pub const PAYEES: [&str; 4] = [
    "Stellar Productions",
    "Creative Artists Group",
    "Independent Films LLC",
    "Music Rights Holdings",
];

pub const LICENSORS: [&str; 4] = [
    "Paramount Media Holdings",
    "Universal Content Group",
    "Warner Distribution LLC",
    "Sony Pictures Entertainment",
];

pub const LICENSEES: [&str; 4] = [
    "Netflix International",
    "Amazon Prime Video",
    "Disney+ Worldwide",
    "HBO Max Global",
];

pub const CONTRACT_TERRITORIES: [&str; 5] = [
    "Worldwide",
    "North America",
    "Europe",
    "Asia Pacific",
    "Latin America",
];

/// (title, inclusive unit range, rate per unit)
pub const ROYALTY_TITLES: [(&str, (u32, u32), f64); 5] = [
    ("The Last Horizon", (10_000, 50_000), 0.15),
    ("Midnight Symphony", (5_000, 25_000), 0.12),
    ("Desert Wind", (8_000, 40_000), 0.18),
    ("City Lights", (15_000, 60_000), 0.10),
    ("Ocean Dreams", (3_000, 15_000), 0.20),
];

pub const CONTRACT_TERM_YEARS: [u32; 4] = [1, 2, 3, 5];

static INVOICE_EN: InvoiceLabels = InvoiceLabels {
    title: "INVOICE",
    invoice_number: "Invoice Number",
    date: "Date",
    due_date: "Due Date",
    bill_to: "Bill To",
    description: "Description",
    quantity: "Qty",
    unit_price: "Unit Price",
    total: "Total",
    subtotal: "Subtotal",
    tax: "Tax (8%)",
    grand_total: "Grand Total",
    payment_terms: "Payment Terms: Net 30",
    thank_you: "Thank you for your business!",
    company: "Acme Production Services",
    items: [
        ("Video Production Services", 40, 150.00),
        ("Post-Production Editing", 24, 125.00),
        ("Sound Design & Mixing", 16, 175.00),
        ("Color Grading", 8, 200.00),
    ],
};

static INVOICE_ES: InvoiceLabels = InvoiceLabels {
    title: "FACTURA",
    invoice_number: "Numero de Factura",
    date: "Fecha",
    due_date: "Fecha de Vencimiento",
    bill_to: "Facturar A",
    description: "Descripcion",
    quantity: "Cant",
    unit_price: "Precio Unitario",
    total: "Total",
    subtotal: "Subtotal",
    tax: "Impuesto (8%)",
    grand_total: "Total General",
    payment_terms: "Terminos de Pago: 30 dias netos",
    thank_you: "Gracias por su negocio!",
    company: "Servicios de Produccion Acme",
    items: [
        ("Servicios de Produccion de Video", 40, 150.00),
        ("Edicion de Post-Produccion", 24, 125.00),
        ("Diseno de Sonido y Mezcla", 16, 175.00),
        ("Correccion de Color", 8, 200.00),
    ],
};

static INVOICE_DE: InvoiceLabels = InvoiceLabels {
    title: "RECHNUNG",
    invoice_number: "Rechnungsnummer",
    date: "Datum",
    due_date: "Faelligkeitsdatum",
    bill_to: "Rechnung An",
    description: "Beschreibung",
    quantity: "Menge",
    unit_price: "Einzelpreis",
    total: "Gesamt",
    subtotal: "Zwischensumme",
    tax: "Steuer (8%)",
    grand_total: "Gesamtbetrag",
    payment_terms: "Zahlungsbedingungen: 30 Tage netto",
    thank_you: "Vielen Dank fuer Ihren Auftrag!",
    company: "Acme Produktionsdienstleistungen",
    items: [
        ("Videoproduktionsdienste", 40, 150.00),
        ("Postproduktionsbearbeitung", 24, 125.00),
        ("Sounddesign und Mischung", 16, 175.00),
        ("Farbkorrektur", 8, 200.00),
    ],
};

static INVOICE_PT: InvoiceLabels = InvoiceLabels {
    title: "FATURA",
    invoice_number: "Numero da Fatura",
    date: "Data",
    due_date: "Data de Vencimento",
    bill_to: "Cobrar De",
    description: "Descricao",
    quantity: "Qtd",
    unit_price: "Preco Unitario",
    total: "Total",
    subtotal: "Subtotal",
    tax: "Imposto (8%)",
    grand_total: "Total Geral",
    payment_terms: "Condicoes de Pagamento: 30 dias liquidos",
    thank_you: "Obrigado pelo seu negocio!",
    company: "Servicos de Producao Acme",
    items: [
        ("Servicos de Producao de Video", 40, 150.00),
        ("Edicao de Pos-Producao", 24, 125.00),
        ("Design de Som e Mixagem", 16, 175.00),
        ("Correcao de Cores", 8, 200.00),
    ],
};

static ROYALTY_EN: RoyaltyLabels = RoyaltyLabels {
    title: "ROYALTY STATEMENT",
    period: "Reporting Period",
    territory: "Territory",
    recipient: "Payee",
    title_col: "Title",
    units: "Units",
    rate: "Rate",
    amount: "Amount",
    total_royalties: "Total Royalties Due",
    payment_date: "Payment Date",
    company: "Global Entertainment Royalties Inc.",
    territories: ["North America", "Europe", "Asia Pacific", "Latin America"],
};

static ROYALTY_ES: RoyaltyLabels = RoyaltyLabels {
    title: "DECLARACION DE REGALIAS",
    period: "Periodo de Informe",
    territory: "Territorio",
    recipient: "Beneficiario",
    title_col: "Titulo",
    units: "Unidades",
    rate: "Tasa",
    amount: "Monto",
    total_royalties: "Total de Regalias Adeudadas",
    payment_date: "Fecha de Pago",
    company: "Global Entertainment Royalties Inc.",
    territories: [
        "America del Norte",
        "Europa",
        "Asia Pacifico",
        "America Latina",
    ],
};

static ROYALTY_DE: RoyaltyLabels = RoyaltyLabels {
    title: "LIZENZGEBUEHRENABRECHNUNG",
    period: "Berichtszeitraum",
    territory: "Territorium",
    recipient: "Zahlungsempfaenger",
    title_col: "Titel",
    units: "Einheiten",
    rate: "Satz",
    amount: "Betrag",
    total_royalties: "Gesamte faellige Lizenzgebuehren",
    payment_date: "Zahlungsdatum",
    company: "Global Entertainment Royalties Inc.",
    territories: ["Nordamerika", "Europa", "Asien-Pazifik", "Lateinamerika"],
};

static ROYALTY_PT: RoyaltyLabels = RoyaltyLabels {
    title: "DEMONSTRATIVO DE ROYALTIES",
    period: "Periodo do Relatorio",
    territory: "Territorio",
    recipient: "Beneficiario",
    title_col: "Titulo",
    units: "Unidades",
    rate: "Taxa",
    amount: "Valor",
    total_royalties: "Total de Royalties Devidos",
    payment_date: "Data de Pagamento",
    company: "Global Entertainment Royalties Inc.",
    territories: [
        "America do Norte",
        "Europa",
        "Asia-Pacifico",
        "America Latina",
    ],
};

static CONTRACT_EN: ContractLabels = ContractLabels {
    title: "LICENSING AGREEMENT",
    parties: "PARTIES",
    party_a: "Party A (Licensor)",
    party_b: "Party B (Licensee)",
    effective_date: "Effective Date",
    term: "Term",
    territory: "Licensed Territory",
    consideration: "Consideration",
    terms_title: "TERMS AND CONDITIONS",
    signature: "SIGNATURES",
    terms: [
        "1. GRANT OF LICENSE: Licensor hereby grants to Licensee a non-exclusive license to distribute the Licensed Content in the Territory.",
        "2. TERM: This Agreement shall commence on the Effective Date and continue for the period specified above.",
        "3. PAYMENT: Licensee shall pay Licensor the Consideration amount within 30 days of execution.",
        "4. INTELLECTUAL PROPERTY: All intellectual property rights remain with the Licensor.",
        "5. CONFIDENTIALITY: Both parties agree to maintain confidentiality of all proprietary information.",
        "6. TERMINATION: Either party may terminate with 90 days written notice.",
    ],
};

static CONTRACT_ES: ContractLabels = ContractLabels {
    title: "ACUERDO DE LICENCIA",
    parties: "PARTES",
    party_a: "Parte A (Licenciante)",
    party_b: "Parte B (Licenciatario)",
    effective_date: "Fecha de Vigencia",
    term: "Plazo",
    territory: "Territorio Licenciado",
    consideration: "Contraprestacion",
    terms_title: "TERMINOS Y CONDICIONES",
    signature: "FIRMAS",
    terms: [
        "1. OTORGAMIENTO DE LICENCIA: El Licenciante otorga al Licenciatario una licencia no exclusiva para distribuir el Contenido en el Territorio.",
        "2. PLAZO: Este Acuerdo comenzara en la Fecha de Vigencia y continuara por el periodo especificado.",
        "3. PAGO: El Licenciatario pagara al Licenciante el monto de Contraprestacion dentro de 30 dias.",
        "4. PROPIEDAD INTELECTUAL: Todos los derechos de propiedad intelectual permanecen con el Licenciante.",
        "5. CONFIDENCIALIDAD: Ambas partes acuerdan mantener la confidencialidad de toda informacion.",
        "6. TERMINACION: Cualquier parte puede terminar con 90 dias de aviso por escrito.",
    ],
};

static CONTRACT_DE: ContractLabels = ContractLabels {
    title: "LIZENZVEREINBARUNG",
    parties: "PARTEIEN",
    party_a: "Partei A (Lizenzgeber)",
    party_b: "Partei B (Lizenznehmer)",
    effective_date: "Wirksamkeitsdatum",
    term: "Laufzeit",
    territory: "Lizenziertes Gebiet",
    consideration: "Gegenleistung",
    terms_title: "GESCHAEFTSBEDINGUNGEN",
    signature: "UNTERSCHRIFTEN",
    terms: [
        "1. LIZENZGEWAEHRUNG: Der Lizenzgeber gewaehrt dem Lizenznehmer eine nicht-exklusive Lizenz zur Verbreitung.",
        "2. LAUFZEIT: Diese Vereinbarung beginnt am Wirksamkeitsdatum und laeuft fuer den angegebenen Zeitraum.",
        "3. ZAHLUNG: Der Lizenznehmer zahlt dem Lizenzgeber den Gegenleistungsbetrag innerhalb von 30 Tagen.",
        "4. GEISTIGES EIGENTUM: Alle geistigen Eigentumsrechte verbleiben beim Lizenzgeber.",
        "5. VERTRAULICHKEIT: Beide Parteien vereinbaren die Vertraulichkeit aller Informationen.",
        "6. KUENDIGUNG: Jede Partei kann mit 90 Tagen schriftlicher Kuendigung beenden.",
    ],
};

static CONTRACT_PT: ContractLabels = ContractLabels {
    title: "CONTRATO DE LICENCIAMENTO",
    parties: "PARTES",
    party_a: "Parte A (Licenciador)",
    party_b: "Parte B (Licenciado)",
    effective_date: "Data de Vigencia",
    term: "Prazo",
    territory: "Territorio Licenciado",
    consideration: "Contraprestacao",
    terms_title: "TERMOS E CONDICOES",
    signature: "ASSINATURAS",
    terms: [
        "1. CONCESSAO DE LICENCA: O Licenciador concede ao Licenciado uma licenca nao exclusiva para distribuir o Conteudo.",
        "2. PRAZO: Este Contrato comecara na Data de Vigencia e continuara pelo periodo especificado.",
        "3. PAGAMENTO: O Licenciado pagara ao Licenciador o valor da Contraprestacao em 30 dias.",
        "4. PROPRIEDADE INTELECTUAL: Todos os direitos de propriedade intelectual permanecem com o Licenciador.",
        "5. CONFIDENCIALIDADE: Ambas as partes concordam em manter a confidencialidade de todas as informacoes.",
        "6. RESCISAO: Qualquer parte pode rescindir com 90 dias de aviso previo por escrito.",
    ],
};

pub fn invoice_labels(lang: Language) -> &'static InvoiceLabels {
    match lang {
        Language::Es => &INVOICE_ES,
        Language::De => &INVOICE_DE,
        Language::Pt => &INVOICE_PT,
        _ => &INVOICE_EN,
    }
}

pub fn royalty_labels(lang: Language) -> &'static RoyaltyLabels {
    match lang {
        Language::Es => &ROYALTY_ES,
        Language::De => &ROYALTY_DE,
        Language::Pt => &ROYALTY_PT,
        _ => &ROYALTY_EN,
    }
}

pub fn contract_labels(lang: Language) -> &'static ContractLabels {
    match lang {
        Language::Es => &CONTRACT_ES,
        Language::De => &CONTRACT_DE,
        Language::Pt => &CONTRACT_PT,
        _ => &CONTRACT_EN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_localized_titles() {
        assert_eq!(invoice_labels(Language::De).title, "RECHNUNG");
        assert_eq!(royalty_labels(Language::Es).title, "DECLARACION DE REGALIAS");
        assert_eq!(contract_labels(Language::Pt).title, "CONTRATO DE LICENCIAMENTO");
    }

    #[test]
    fn test_unsupported_language_falls_back_to_english() {
        assert!(!has_template(Language::Ru));
        assert_eq!(invoice_labels(Language::Ru).title, "INVOICE");
        assert_eq!(contract_labels(Language::Zh).signature, "SIGNATURES");
    }

    #[test]
    fn test_invoice_items_share_prices_across_languages() {
        for lang in TEMPLATE_LANGUAGES {
            let prices: Vec<_> = invoice_labels(lang)
                .items
                .iter()
                .map(|(_, qty, price)| (*qty, *price))
                .collect();
            assert_eq!(
                prices,
                vec![(40, 150.0), (24, 125.0), (16, 175.0), (8, 200.0)]
            );
        }
    }
}
