#![allow(dead_code)]

use listing_digest::{EmailProcessor, DEFAULT_EXCLUDED_SUBJECTS};

pub const BOUNDARY: &str = "==alert-boundary==";

pub fn processor() -> EmailProcessor {
    EmailProcessor::builtin(
        DEFAULT_EXCLUDED_SUBJECTS
            .iter()
            .map(|s| s.to_string())
            .collect(),
    )
    .expect("builtin rules")
}

/// multipart/alternative message with a text part and one html part per entry.
pub fn alert(from: &str, subject: &str, html_parts: &[&str]) -> Vec<u8> {
    let mut raw = format!(
        "From: {from}\r\n\
         To: casas@example.com\r\n\
         Subject: {subject}\r\n\
         MIME-Version: 1.0\r\n\
         Content-Type: multipart/alternative; boundary=\"{BOUNDARY}\"\r\n\
         \r\n\
         --{BOUNDARY}\r\n\
         Content-Type: text/plain; charset=utf-8\r\n\
         \r\n\
         Abra este email num browser.\r\n"
    );
    for html in html_parts {
        raw.push_str(&format!(
            "--{BOUNDARY}\r\n\
             Content-Type: text/html; charset=utf-8\r\n\
             \r\n\
             {html}\r\n"
        ));
    }
    raw.push_str(&format!("--{BOUNDARY}--\r\n"));
    raw.into_bytes()
}

pub const IDEALISTA_HTML: &str = r#"<html><body>
<!-- preheader - description mail --><div><span>Apartamento T3 €160000</span></div><!-- header -->
<table><tr><td><a href="https://www.idealista.pt/imovel/123">Ver anúncio</a></td></tr>
<tr><td><a href="https://www.idealista.pt/user/alerts">Gerir alertas</a></td></tr></table>
</body></html>"#;

pub const CASAYES_HTML: &str = r#"<html><body>
<a href="https://1818X.trk.elasticemail.com/tracking/click?d=logo"><img src="logo.png"></a>
<p style=color:#111317;line-height:27px;margin:0;overflow:hidden;text-overflow:ellipsis;white-space:nowrap;max-width:260px><b>Moradia T3</b> <b>Esgueira, Aveiro</b></p>
<p style=color:#576075;line-height:27px;margin:0;overflow:hidden;text-overflow:ellipsis;white-space:nowrap;max-width:260px>Ver detalhes</p>
<a href="https://1818X.trk.elasticemail.com/tracking/click?d=listing">Ver imóvel</a>
<a href="https://1818X.trk.elasticemail.com/tracking/click?d=unsubscribe">Cancelar</a>
</body></html>"#;

pub const CASA_SAPO_HTML: &str = r#"<html><body><table><tr>
<td style="font-size: 13px; color: #777777; font-family: Arial, Helvetica, sans-serif; padding: 2px 0;"><span>Para: Venda</span><span>Preço: 250 000 €</span><span>Estado: Usado</span></td>
</tr></table>
<p style="text-align: center; margin: 0 0 30px 0; font-family: Arial, Helvetica, sans-serif"><a href="https://casa.sapo.pt/detalhes/moradia-t3-aveiro">Ver</a></p>
</body></html>"#;

pub const SUPERCASA_HTML: &str = r#"<html><body>
<!-- Pre-header --><div style="display:none">Apartamento T3, venda em Aveiro!</div><!-- End region Pre-header -->
<a href="https://supercasa.pt/alertas">Gerir</a>
<a href="https://supercasa.pt/venda-apartamento-t3-aveiro/i1736538">Ver imóvel</a>
</body></html>"#;

pub const IMOVIRTUAL_HTML: &str = r#"<html><body><table>
<tr><td style="padding-bottom: 8px;"><h2>Moradia T4 para venda
 em Aveiro</h2></td></tr>
<tr><td><a href="https://www.imovirtual.com/pt/conta">Conta</a>
<a href="https://www.imovirtual.com/pt/anuncio/moradia-t4-ID1bQx3">Ver anúncio</a></td></tr>
</table></body></html>"#;
