// src/render/layout.rs
// =============================================================================
// Page layout: a standalone HTML document around rendered snippets.
//
// Every page carries the cookie consent banner after its content. The banner
// is rendered once, when the layout is built, and is the same on every page.
// Its only state is the dismissed flag, kept in the browser's localStorage.
// =============================================================================

use maud::{html, Markup, PreEscaped, DOCTYPE};

pub const CONSENT_MESSAGE: &str = "This site uses anonymized cookies for analytics.";
const CONSENT_STORAGE_KEY: &str = "github-snippet-consent";

const BANNER_STYLE: &str = "position:fixed;left:0;right:0;bottom:0;padding:15px;\
    background:#353535;color:#fff;display:flex;justify-content:space-between";

/// The fixed informational banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsentBanner {
    html: String,
}

impl ConsentBanner {
    pub fn new() -> Self {
        let script = format!(
            "(function(){{var k='{CONSENT_STORAGE_KEY}',b=document.getElementById('cookie-consent');\
             try{{if(localStorage.getItem(k)==='true'){{b.style.display='none';}}}}catch(e){{}}\
             document.getElementById('cookie-consent-accept').addEventListener('click',function(){{\
             try{{localStorage.setItem(k,'true');}}catch(e){{}}b.style.display='none';}});}})();"
        );

        let markup: Markup = html! {
            div id="cookie-consent" class="cookie-consent" role="dialog" style=(BANNER_STYLE) {
                span { (CONSENT_MESSAGE) }
                button type="button" id="cookie-consent-accept" { "I understand" }
            }
            script { (PreEscaped(script)) }
        };
        Self {
            html: markup.into_string(),
        }
    }

    pub fn html(&self) -> &str {
        &self.html
    }
}

impl Default for ConsentBanner {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct Layout {
    title: String,
    banner: ConsentBanner,
}

impl Layout {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            banner: ConsentBanner::new(),
        }
    }

    // Wraps rendered snippet markup into a full document.
    //
    // Parameters:
    //   children: already-rendered HTML, inserted unescaped
    //
    // Returns: the document, with the consent banner mounted after `children`
    // whether or not they are empty.
    pub fn compose(&self, children: &str) -> String {
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    title { (self.title) }
                }
                body {
                    (PreEscaped(children))
                    (PreEscaped(self.banner.html()))
                }
            }
        }
        .into_string()
    }
}
