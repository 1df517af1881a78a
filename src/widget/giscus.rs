//! giscus comment widget: embed markup and theme control.

use std::fmt;

use minijinja::Environment;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::debug;

use super::channel::MessageChannel;
use super::{WidgetError, WidgetHost};
use crate::theme::ResolvedTheme;

/// Id of the element the loader script is placed in.
pub const CONTAINER_ID: &str = "giscus_thread";

const EMBED_TEMPLATE_NAME: &str = "giscus.html";

const EMBED_TEMPLATE: &str = r#"<div id="{{ container_id }}">
<script src="{{ script_src }}" async crossorigin="anonymous"
 data-repo="{{ repo }}"
 data-repo-id="{{ repo_id }}"
 data-category="{{ category }}"
 data-category-id="{{ category_id }}"
 data-mapping="{{ mapping }}"
{%- if term %}
 data-term="{{ term }}"
{%- endif %}
 data-strict="{{ strict }}"
 data-reactions-enabled="{{ reactions_enabled }}"
 data-emit-metadata="{{ emit_metadata }}"
 data-input-position="{{ input_position }}"
 data-theme="{{ theme }}"
 data-lang="{{ lang }}"
 data-loading="lazy"></script>
</div>"#;

/// How giscus maps a page to a discussion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mapping {
    #[default]
    Pathname,
    Url,
    Title,
    #[serde(rename = "og:title")]
    OgTitle,
    Specific,
    Number,
}

impl Mapping {
    pub fn as_str(self) -> &'static str {
        match self {
            Mapping::Pathname => "pathname",
            Mapping::Url => "url",
            Mapping::Title => "title",
            Mapping::OgTitle => "og:title",
            Mapping::Specific => "specific",
            Mapping::Number => "number",
        }
    }

    /// `specific` and `number` mappings need an explicit term.
    pub fn needs_term(self) -> bool {
        matches!(self, Mapping::Specific | Mapping::Number)
    }
}

impl fmt::Display for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the comment box sits relative to the thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputPosition {
    Top,
    #[default]
    Bottom,
}

impl InputPosition {
    pub fn as_str(self) -> &'static str {
        match self {
            InputPosition::Top => "top",
            InputPosition::Bottom => "bottom",
        }
    }
}

/// giscus loader settings.
///
/// Every field has a default, so a configuration file only needs the
/// repository and category identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GiscusOptions {
    /// Key of the control message envelope.
    pub widget_name: String,
    /// Origin control messages are addressed to.
    pub origin: String,
    pub script_src: String,
    pub repo: String,
    pub repo_id: String,
    pub category: String,
    pub category_id: String,
    pub mapping: Mapping,
    pub term: Option<String>,
    pub strict: bool,
    pub reactions_enabled: bool,
    pub emit_metadata: bool,
    pub input_position: InputPosition,
    pub lang: String,
}

impl Default for GiscusOptions {
    fn default() -> Self {
        Self {
            widget_name: "giscus".to_string(),
            origin: "https://giscus.app".to_string(),
            script_src: "https://giscus.app/client.js".to_string(),
            repo: String::new(),
            repo_id: String::new(),
            category: String::new(),
            category_id: String::new(),
            mapping: Mapping::default(),
            term: None,
            strict: false,
            reactions_enabled: true,
            emit_metadata: false,
            input_position: InputPosition::default(),
            lang: "en".to_string(),
        }
    }
}

impl GiscusOptions {
    /// Checks that the options describe a loadable widget.
    pub fn validate(&self) -> Result<(), WidgetError> {
        let required = [
            ("repo", &self.repo),
            ("repo_id", &self.repo_id),
            ("category", &self.category),
            ("category_id", &self.category_id),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(WidgetError::MissingField(name));
            }
        }
        let has_term = self.term.as_deref().is_some_and(|t| !t.trim().is_empty());
        if self.mapping.needs_term() && !has_term {
            return Err(WidgetError::MissingTerm(self.mapping));
        }
        Ok(())
    }

    /// Returns `true` once the repository is configured.
    pub fn is_configured(&self) -> bool {
        !self.repo.trim().is_empty()
    }
}

fn flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

#[derive(Serialize)]
struct EmbedContext<'a> {
    container_id: &'a str,
    script_src: &'a str,
    repo: &'a str,
    repo_id: &'a str,
    category: &'a str,
    category_id: &'a str,
    mapping: &'a str,
    term: Option<&'a str>,
    strict: &'a str,
    reactions_enabled: &'a str,
    emit_metadata: &'a str,
    input_position: &'a str,
    theme: &'a str,
    lang: &'a str,
}

/// Renders the container and loader script for a fresh mount.
///
/// Attribute values are HTML-escaped.
///
/// # Errors
///
/// Returns an error if the options are incomplete or the template fails.
pub fn render_embed(options: &GiscusOptions, theme: ResolvedTheme) -> Result<String, WidgetError> {
    options.validate()?;

    let mut env = Environment::new();
    env.add_template(EMBED_TEMPLATE_NAME, EMBED_TEMPLATE)?;
    let tmpl = env.get_template(EMBED_TEMPLATE_NAME)?;

    let ctx = EmbedContext {
        container_id: CONTAINER_ID,
        script_src: &options.script_src,
        repo: &options.repo,
        repo_id: &options.repo_id,
        category: &options.category,
        category_id: &options.category_id,
        mapping: options.mapping.as_str(),
        term: options.term.as_deref().filter(|t| !t.trim().is_empty()),
        strict: flag(options.strict),
        reactions_enabled: flag(options.reactions_enabled),
        emit_metadata: flag(options.emit_metadata),
        input_position: options.input_position.as_str(),
        theme: theme.as_str(),
        lang: &options.lang,
    };
    Ok(tmpl.render(ctx)?)
}

/// Builds the `setConfig` control message for a theme change.
///
/// ```rust
/// use sitetheme::{control_message, ResolvedTheme};
///
/// let msg = control_message("giscus", ResolvedTheme::Dark);
/// assert_eq!(msg["giscus"]["setConfig"]["theme"], "dark");
/// ```
pub fn control_message(widget_name: &str, theme: ResolvedTheme) -> Value {
    let mut root = Map::new();
    root.insert(
        widget_name.to_string(),
        json!({ "setConfig": { "theme": theme.as_str() } }),
    );
    Value::Object(root)
}

/// A giscus widget instance on the page.
///
/// The widget only accepts theme updates while its frame channel is
/// attached; [`unmount`](GiscusWidget::unmount) detaches it and may be called
/// any number of times.
#[derive(Debug)]
pub struct GiscusWidget<C> {
    options: GiscusOptions,
    frame: Option<C>,
}

impl<C: MessageChannel> GiscusWidget<C> {
    /// Creates a widget with no frame attached.
    pub fn new(options: GiscusOptions) -> Self {
        Self {
            options,
            frame: None,
        }
    }

    /// Creates a widget whose frame is already loaded.
    pub fn with_channel(options: GiscusOptions, channel: C) -> Self {
        Self {
            options,
            frame: Some(channel),
        }
    }

    /// Clears any previous frame and returns fresh embed markup.
    pub fn mount(&mut self, theme: ResolvedTheme) -> Result<String, WidgetError> {
        self.unmount();
        render_embed(&self.options, theme)
    }

    /// Records that the frame has loaded and can receive messages.
    pub fn attach(&mut self, channel: C) {
        self.frame = Some(channel);
    }

    /// Detaches the frame, returning its channel if one was attached.
    pub fn unmount(&mut self) -> Option<C> {
        self.frame.take()
    }

    pub fn is_attached(&self) -> bool {
        self.frame.is_some()
    }

    pub fn options(&self) -> &GiscusOptions {
        &self.options
    }

    fn try_set_theme(&mut self, theme: ResolvedTheme) -> Result<(), WidgetError> {
        let Some(frame) = self.frame.as_mut() else {
            debug!(widget = %self.options.widget_name, "comment widget frame not attached; skipping theme update");
            return Ok(());
        };
        let message = control_message(&self.options.widget_name, theme);
        frame.post(&message, &self.options.origin)
    }
}

impl<C: MessageChannel> WidgetHost for GiscusWidget<C> {
    fn set_theme(&mut self, theme: ResolvedTheme) {
        if let Err(e) = self.try_set_theme(theme) {
            debug!(widget = %self.options.widget_name, error = %e, "comment widget theme update failed");
        }
    }
}
