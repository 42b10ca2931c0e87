/// Scripts injected into the active tab

use crate::host::TabHost;
use regex::Regex;
use std::sync::LazyLock;

/// Named colors, hex, and rgb()/hsl() style functions. No quotes or semicolons.
static CSS_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(#[0-9a-fA-F]{3,8}|[a-zA-Z]+|(rgb|rgba|hsl|hsla)\([0-9.,%\s]+\))$")
        .expect("valid color pattern")
});

/// Build the script that sets the page background
pub fn background_color_script(color: &str) -> Result<String, String> {
    let color = color.trim();
    if !CSS_COLOR.is_match(color) {
        return Err(format!("Invalid color: {:?}", color));
    }

    Ok(format!("document.body.style.backgroundColor=\"{}\";", color))
}

/// Change the background color of the active tab's page
pub async fn change_background_color<H: TabHost>(host: &H, color: &str) -> Result<(), String> {
    let script = background_color_script(color)?;
    log::debug!("Injecting {}", script);
    host.execute_script(&script).await
}
