//! Terminal rendering through minijinja templates with console styles.

use std::collections::HashMap;

use console::Style;
use minijinja::Environment;
use serde::Serialize;
use shelf::{FilterOptions, Indicator, Projection};
use shelf_ingest::Record;
use shelf_seeker::PageInfo;

const PAGE_TEMPLATE: &str = r#"{% for record in records -%}
{{ record.Name | style("name") }}  {{ record.License | style("license") }}  {{ record.Category | style("muted") }}
  {{ record.Link | style("link") }}
{% if record.Tags %}  {{ record.Tags | join(", ") | style("tags") }}
{% endif %}
{% else -%}
{{ message | style("muted") }}

{% endfor -%}
{{ label | style("footer") }} {{ ("(" ~ page.total_items ~ " matched)") | style("muted") }}"#;

const OPTIONS_TEMPLATE: &str = r#"{{ "Categories" | style("header") }}
{% for category in categories %}  {{ category }}
{% endfor %}
{{ "Licenses" | style("header") }}
{% for license in licenses %}  {{ license | style("license") }}
{% endfor %}"#;

fn theme() -> HashMap<&'static str, Style> {
    HashMap::from([
        ("header", Style::new().bold().cyan()),
        ("name", Style::new().bold()),
        ("license", Style::new().yellow()),
        ("link", Style::new().blue().underlined()),
        ("tags", Style::new().green()),
        ("muted", Style::new().dim()),
        ("footer", Style::new().magenta()),
    ])
}

#[derive(Serialize)]
struct PageView<'a> {
    records: Vec<&'a Record>,
    page: PageInfo,
    label: String,
    message: &'static str,
}

/// Renders pages and option lists, styled or plain.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new(styled: bool) -> Result<Self, minijinja::Error> {
        let theme: HashMap<&'static str, Style> = theme()
            .into_iter()
            .map(|(name, style)| (name, style.force_styling(styled)))
            .collect();

        let mut env = Environment::new();
        env.add_filter("style", move |value: String, name: String| -> String {
            match theme.get(name.as_str()) {
                Some(style) => style.apply_to(value).to_string(),
                None => value,
            }
        });
        env.add_template("page", PAGE_TEMPLATE)?;
        env.add_template("options", OPTIONS_TEMPLATE)?;
        Ok(Self { env })
    }

    pub fn page(
        &self,
        projection: &Projection,
        indicator: Indicator,
    ) -> Result<String, minijinja::Error> {
        let view = PageView {
            records: projection.records().collect(),
            page: projection.page(),
            label: projection.to_string(),
            message: indicator.message().unwrap_or_default(),
        };
        self.env.get_template("page")?.render(view)
    }

    pub fn options(&self, options: &FilterOptions) -> Result<String, minijinja::Error> {
        self.env.get_template("options")?.render(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf::{Engine, EngineConfig, Event};
    use shelf_ingest::TextSource;

    const CATALOG: &str = "Name,Link,Category,License,Tags\n\
        Krita,https://krita.org,Tools,GPL,\"paint, 2d\"\n\
        Kenney,https://kenney.nl,Assets,CC0,\n";

    fn engine() -> Engine {
        let mut engine = Engine::new(&EngineConfig::default()).unwrap();
        engine.load(&mut TextSource::new(CATALOG)).unwrap();
        engine
    }

    #[test]
    fn renders_plain_page() {
        let engine = engine();
        let renderer = Renderer::new(false).unwrap();
        let output = renderer
            .page(engine.projection().unwrap(), engine.indicator())
            .unwrap();

        assert!(output.starts_with("Kenney  CC0  Assets\n  https://kenney.nl\n"));
        assert!(output.contains("  paint, 2d\n"));
        assert!(output.ends_with("Page 1 of 1 (2 matched)"));
        assert!(!output.contains('\u{1b}'));
    }

    #[test]
    fn renders_empty_state() {
        let mut engine = engine();
        engine.dispatch(Event::name("nope"));
        let renderer = Renderer::new(false).unwrap();
        let output = renderer
            .page(engine.projection().unwrap(), engine.indicator())
            .unwrap();
        assert!(output.starts_with("No results found."));
        assert!(output.ends_with("Page 1 of 1 (0 matched)"));
    }

    #[test]
    fn styled_output_has_escapes() {
        let engine = engine();
        let renderer = Renderer::new(true).unwrap();
        let output = renderer
            .page(engine.projection().unwrap(), engine.indicator())
            .unwrap();
        assert!(output.contains('\u{1b}'));
    }

    #[test]
    fn renders_options() {
        let engine = engine();
        let renderer = Renderer::new(false).unwrap();
        let output = renderer.options(engine.filter_options().unwrap()).unwrap();
        assert!(output.starts_with("Categories\n  Assets\n  Tools\n"));
        assert!(output.contains("Licenses\n  CC0\n  GPL\n"));
    }
}
