//! Yakusu CLI - translate from the terminal and edit translator settings.

use anyhow::Context;
use clap::{Parser, Subcommand};
use yakusu::config::Config;
use yakusu::console::Console;
use yakusu::error::Result;
use yakusu::i18n::I18n;
use yakusu::options::{OptionsPage, SettingKind, TRANSLATOR_SELECTORS};
use yakusu::settings::{DEFAULT_TRANSLATOR, LanguageSetting, SettingsStore, TranslatorConfig};
use yakusu::translators::TranslatorRegistry;

/// Baidu web translator client.
#[derive(Parser, Debug)]
#[command(name = "yakusu")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Translate text.
    Translate {
        /// Text to translate.
        text: String,

        /// Source language (defaults to the saved setting).
        #[arg(long)]
        from: Option<String>,

        /// Target language (defaults to the saved setting).
        #[arg(long)]
        to: Option<String>,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Detect the language of text.
    Detect {
        /// Text to inspect.
        text: String,
    },

    /// List supported languages.
    Languages,

    /// Show or edit settings.
    Options {
        #[command(subcommand)]
        action: Option<OptionsAction>,
    },
}

#[derive(Subcommand, Debug)]
enum OptionsAction {
    /// Show all settings.
    Show,

    /// Print stored settings as JSON, optionally only the given top-level keys.
    Get { keys: Vec<String> },

    /// Flip a switch, e.g. "OtherSettings.SelectTranslate".
    Toggle { path: String },

    /// Add a value to a checkbox list.
    Check { path: String, value: String },

    /// Remove a value from a checkbox list.
    Uncheck { path: String, value: String },

    /// Select a radio value.
    Choose { path: String, value: String },

    /// Select the translator for a group of result fields.
    Translator { selector: String, translator: String },

    /// Set the default language pair.
    Language {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let console = Console::new();

    if let Err(e) = run(args, &console).await {
        console.error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(args: Args, console: &Console) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    let settings_path = config.settings_path()?;
    let store = SettingsStore::open(&settings_path)
        .with_context(|| format!("Failed to open settings: {}", settings_path.display()))?;
    let registry =
        TranslatorRegistry::new(&config.http).context("Failed to set up translators")?;
    let i18n = I18n::detect(config.locale.as_deref());

    match args.command {
        Command::Translate {
            text,
            from,
            to,
            json,
        } => translate(console, &registry, &store, &text, from, to, json).await,
        Command::Detect { text } => detect(console, &registry, &store, &text).await,
        Command::Languages => {
            let translator = default_translator(&registry, &store)?;
            for language in translator.supported_languages() {
                println!("{}", language);
            }
            Ok(())
        }
        Command::Options { action } => {
            let languages = LanguageSetting::load(&store)?;
            let available = registry
                .available_translators(&languages.sl, &languages.tl)
                .into_iter()
                .map(str::to_string)
                .collect();
            let mut page = OptionsPage::load(store, i18n, available)?;
            edit_options(console, &registry, &mut page, action.unwrap_or(OptionsAction::Show))
        }
    }
}

/// Translator selected for the main meaning.
fn default_translator<'a>(
    registry: &'a TranslatorRegistry,
    store: &SettingsStore,
) -> Result<&'a dyn yakusu::Translator> {
    let config = TranslatorConfig::load(store)?;
    let id = config.selection("mainMeaning").unwrap_or(DEFAULT_TRANSLATOR);
    registry
        .get(id)
        .ok_or_else(|| anyhow::anyhow!("Translator not available: {}", id))
}

async fn translate(
    console: &Console,
    registry: &TranslatorRegistry,
    store: &SettingsStore,
    text: &str,
    from: Option<String>,
    to: Option<String>,
    json: bool,
) -> Result<()> {
    if text.trim().is_empty() {
        anyhow::bail!("Nothing to translate");
    }

    let languages = LanguageSetting::load(store)?;
    let from = from.unwrap_or(languages.sl);
    let to = to.unwrap_or(languages.tl);
    let translator = default_translator(registry, store)?;

    if !json {
        console.step(&format!("Translating {} -> {}...", from, to));
    }
    let result = translator
        .translate(text, &from, &to)
        .await
        .with_context(|| format!("Translation failed ({} -> {})", from, to))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        console.result(&result);
    }
    Ok(())
}

async fn detect(
    console: &Console,
    registry: &TranslatorRegistry,
    store: &SettingsStore,
    text: &str,
) -> Result<()> {
    let translator = default_translator(registry, store)?;
    let language = translator
        .detect(text)
        .await
        .context("Language detection failed")?;
    console.success(&language);
    Ok(())
}

fn edit_options(
    console: &Console,
    registry: &TranslatorRegistry,
    page: &mut OptionsPage,
    action: OptionsAction,
) -> Result<()> {
    match action {
        OptionsAction::Show => show_options(console, page)?,
        OptionsAction::Get { keys } => {
            let store = page.store();
            let items = if keys.is_empty() {
                store.all().clone()
            } else {
                let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
                store.get_many(&keys)
            };
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
        OptionsAction::Toggle { path } => {
            let on = page.toggle(&path)?;
            console.success(&format!("{} = {}", path, on));
        }
        OptionsAction::Check { path, value } => {
            page.check(&path, &value, true)?;
            console.success(&format!("{} += {}", path, value));
        }
        OptionsAction::Uncheck { path, value } => {
            page.check(&path, &value, false)?;
            console.success(&format!("{} -= {}", path, value));
        }
        OptionsAction::Choose { path, value } => {
            page.choose(&path, &value)?;
            console.success(&format!("{} = {}", path, value));
        }
        OptionsAction::Translator {
            selector,
            translator,
        } => {
            page.select_translator(&selector, &translator)?;
            console.success(&format!("{} -> {}", selector, translator));
        }
        OptionsAction::Language { from, to } => {
            let setting = page.set_languages(from.as_deref(), to.as_deref())?;

            // Translators on offer depend on the language pair.
            let available: Vec<String> = registry
                .available_translators(&setting.sl, &setting.tl)
                .into_iter()
                .map(str::to_string)
                .collect();
            if available.is_empty() {
                console.warning("No translator supports this language pair");
            }
            let config = page.translator_config().clone();
            page.update_translator_config_options(config, available);

            console.success(&format!("{} -> {}", setting.sl, setting.tl));
        }
    }
    Ok(())
}

fn show_options(console: &Console, page: &OptionsPage) -> Result<()> {
    console.section(&page.message("OptionsTitle"));
    console.info(&console.muted(&page.store().filepath().display().to_string()));

    let languages = page.language_setting()?;
    console.section(&page.message("LanguageSettingTitle"));
    println!("  {}: {}", page.message("SourceLanguage"), languages.sl);
    println!("  {}: {}", page.message("TargetLanguage"), languages.tl);

    console.section(&page.message("TranslatorConfigTitle"));
    for selector in TRANSLATOR_SELECTORS {
        let choices = page.translator_choices(selector.name)?;
        let rendered: Vec<String> = choices
            .iter()
            .map(|c| format!("{} {}", console.marker(c.selected), c.label))
            .collect();
        println!(
            "  {} {}: {}",
            page.message(selector.label),
            console.muted(&format!("({})", selector.name)),
            rendered.join("  ")
        );
    }

    let mut section = "";
    for item in page.items()? {
        if item.input.section != section {
            section = item.input.section;
            console.section(&page.message(section));
        }

        let target = match (item.input.kind, item.input.value) {
            (SettingKind::Switch, _) | (_, None) => item.input.path.replace(' ', "."),
            (_, Some(value)) => format!("{}={}", item.input.path.replace(' ', "."), value),
        };
        println!(
            "  {} {} {}",
            console.marker(item.checked),
            item.label,
            console.muted(&format!("({})", target))
        );
    }

    Ok(())
}
