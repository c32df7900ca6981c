//! keyrelay demo — entry point.
//!
//! Drives the virtual keyboard against an in-memory document and prints the
//! result, in either of the two operating modes:
//!
//! - **direct** (default): the panel injects straight into the document
//!   through a [`DirectSink`].
//! - **relayed** (`--relay`): the panel encodes key presses onto the relay
//!   channel; an origin-validating [`RelayReceiver`] on the other end applies
//!   them.
//!
//! # Usage
//!
//! ```text
//! keyrelay [OPTIONS]
//!
//! Options:
//!   --config <PATH>     TOML config file (defaults apply when absent)
//!   --language <CODE>   Layout code, overrides the config [default: from config]
//!   --text <TEXT>       Text to type through the panel [default: hello]
//!   --relay             Go through the relay instead of injecting directly
//! ```
//!
//! The log level is controlled by `RUST_LOG` (e.g. `RUST_LOG=debug`).

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use keyrelay_core::Origin;
use keyrelay_host::{BufferField, PageDocument, PageElement, RelayReceiver, TextField};
use keyrelay_panel::{DirectSink, KeySink, KeyboardPanel, PanelConfig, RelaySender};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// keyrelay virtual keyboard demo.
#[derive(Debug, Parser)]
#[command(
    name = "keyrelay",
    about = "Multi-language virtual keyboard with direct and relayed injection",
    version
)]
struct Cli {
    /// Path to a TOML configuration file.
    ///
    /// When absent, built-in defaults apply (English layout, 100 ms shift
    /// release).
    #[arg(long, env = "KEYRELAY_CONFIG")]
    config: Option<PathBuf>,

    /// Language layout code (en, hi, ar, es, fr, de, ru); overrides the
    /// config file.
    #[arg(long, env = "KEYRELAY_LANG")]
    language: Option<String>,

    /// Text to type through the panel, key press by key press.
    #[arg(long, default_value = "hello")]
    text: String,

    /// Route key presses through the relay channel instead of injecting
    /// directly.
    #[arg(long, default_value_t = false)]
    relay: bool,
}

// ── Typing helper ─────────────────────────────────────────────────────────────

/// Types `text` by pressing the panel keys that produce each character.
///
/// Characters only reachable through shift get a Shift press first.  Because
/// the shift auto-release is time-based and this types far faster than a
/// human, shift is toggled back off explicitly before the next unshifted
/// character instead of waiting out the release window.  Characters no key
/// produces on the current layout are skipped with a warning.
fn type_text<S: KeySink>(panel: &mut KeyboardPanel<S>, text: &str) {
    for ch in text.chars() {
        match ch {
            '\n' => {
                panel.press("Enter");
            }
            '\t' => {
                panel.press("Tab");
            }
            ' ' => {
                panel.press(" ");
            }
            _ => {
                let wanted = ch.to_string();
                let unshifted = panel
                    .layout()
                    .keys()
                    .find(|key| key.display == wanted)
                    .map(|key| key.logical_key.clone());
                let shifted = panel
                    .layout()
                    .keys()
                    .find(|key| key.shift_display.as_deref() == Some(wanted.as_str()))
                    .map(|key| key.logical_key.clone());
                let shift_active = panel.state().modifiers().shift_active();
                match (unshifted, shifted) {
                    (Some(logical), _) => {
                        if shift_active {
                            panel.press("Shift");
                        }
                        panel.press(&logical);
                    }
                    (None, Some(logical)) => {
                        if !shift_active {
                            panel.press("Shift");
                        }
                        panel.press(&logical);
                    }
                    (None, None) => {
                        warn!(%ch, "no key on the current layout produces this character");
                    }
                }
            }
        }
    }
}

fn document_with_field() -> (PageDocument, usize) {
    let mut document = PageDocument::new();
    let idx = document.add(PageElement::Field(BufferField::new()));
    document.focus(idx);
    (document, idx)
}

fn field_value(document: &PageDocument, idx: usize) -> String {
    document
        .field(idx)
        .map(|field| field.value().to_string())
        .unwrap_or_default()
}

// ── Modes ─────────────────────────────────────────────────────────────────────

fn run_direct(config: &PanelConfig, text: &str) {
    let (document, idx) = document_with_field();
    let mut panel = KeyboardPanel::new(config, DirectSink::new(document));
    panel.show();

    type_text(&mut panel, text);

    let document = panel.into_sink().document;
    info!(
        value = %field_value(&document, idx),
        "direct injection finished"
    );
}

async fn run_relayed(config: &PanelConfig, text: &str) {
    let (sender, mut carrier) =
        RelaySender::channel(Origin::new(config.relay.panel_origin.clone()));
    let mut panel = KeyboardPanel::new(config, sender);
    panel.show(); // emits init over the relay

    type_text(&mut panel, text);
    drop(panel); // closes the carrier so the drain below terminates

    let mut receiver = RelayReceiver::new(config.trusted_origins());
    let (mut document, idx) = document_with_field();
    while let Some(envelope) = carrier.recv().await {
        receiver.handle(&envelope, &mut document);
    }

    info!(
        state = ?receiver.state(),
        value = %field_value(&document, idx),
        "relayed injection finished"
    );
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => PanelConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => PanelConfig::default(),
    };
    if let Some(language) = &cli.language {
        config.language = language.clone();
    }

    info!(language = %config.language, relay = cli.relay, "keyrelay starting");

    if cli.relay {
        run_relayed(&config, &cli.text).await;
    } else {
        run_direct(&config, &cli.text);
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
