use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_WEBHOOK_URL: &str = "http://localhost:8000/gmah";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:9090";
pub const DEFAULT_MAILDIR: &str = "Maildir/Casas";
pub const DEFAULT_DUMP_DIR: &str = "html";

/// Path prefix under which the digest directory is served.
pub const DUMP_ROUTE: &str = "dump";
pub const DIGEST_FILE_SUFFIX: &str = "_serve.html";
pub const DIGEST_DATE_FORMAT: &str = "%Y-%m-%d";
/// Date format the bot uses when asking for an older digest.
pub const LOOKUP_DATE_FORMAT: &str = "%d/%m/%Y";

// Automated notifications that never carry a listing
pub const DEFAULT_EXCLUDED_SUBJECTS: &[&str] = &["Novos anúncios hoje", "Imóveis da mediadora Loben"];

pub const IDEALISTA: &str = "idealista";
pub const SUPERCASA: &str = "SUPERCASA";
pub const CASA_SAPO: &str = "Casa";
pub const IMOVIRTUAL: &str = "Imovirtual";
pub const CASAYES: &str = "CasaYes";

pub const IDEALISTA_LINK: &str = "https://www.idealista.pt/imovel";
pub const SUPERCASA_LINK: &str = "https://supercasa.pt/venda";
pub const CASA_SAPO_LINK: &str = "https://casa.sapo.pt/detalhes";
pub const IMOVIRTUAL_LINK: &str = "anuncio";
pub const CASAYES_LINK: &str = "1818X.trk.elasticemail.com";

pub const IDEALISTA_MARKERS: (&str, &str) = ("<!-- preheader - description mail -->", "<!-- header -->");
pub const SUPERCASA_MARKERS: (&str, &str) = ("<!-- Pre-header -->", "<!-- End region Pre-header -->");
pub const CASA_SAPO_MARKERS: (&str, &str) = (
    "font-size: 13px; color: #777777; font-family: Arial, Helvetica, sans-serif; padding: 2px 0;",
    "text-align: center; margin: 0 0 30px 0; font-family: Arial, Helvetica, sans-serif",
);
pub const IMOVIRTUAL_MARKERS: (&str, &str) = (r#"<td style="padding-bottom: 8px;">"#, "</td>");
pub const CASAYES_MARKERS: (&str, &str) = (
    "p style=color:#111317;line-height:27px;margin:0;overflow:hidden;text-overflow:ellipsis;white-space:nowrap;max-width:260px",
    "p style=color:#576075;line-height:27px;margin:0;overflow:hidden;text-overflow:ellipsis;white-space:nowrap;max-width:260px",
);

/// Casa Sapo summary fields as `(label, pattern)`; group 1 is the value.
pub const CASA_SAPO_FIELDS: &[(&str, &str)] = &[
    ("Para", r"Para: (Venda|Arrendar)"),
    ("Preço", r"Preço: (.*?€)"),
    ("Estado", r"Estado: (\w+\s*\w*)"),
];

pub const EURO: char = '€';

pub fn default_timeout() -> Duration {
    Duration::from_secs(DEFAULT_TIMEOUT_SECS)
}
