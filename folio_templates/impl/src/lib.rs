use std::sync::Arc;

use anyhow::Context;
use folio_templates_contracts::{Template, TemplateService, BASE_TEMPLATE, TEMPLATES};
use tera::Tera;

#[derive(Debug, Clone)]
pub struct TemplateServiceImpl {
    tera: Arc<Tera>,
}

impl TemplateServiceImpl {
    pub fn new() -> anyhow::Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_template("base.html", BASE_TEMPLATE)
            .context("Failed to load base template")?;

        for &(name, template) in TEMPLATES {
            tera.add_raw_template(name, template)
                .with_context(|| format!("Failed to load template {name}"))?;
        }

        Ok(Self { tera: tera.into() })
    }
}

impl TemplateService for TemplateServiceImpl {
    #[tracing::instrument(skip_all, fields(template = T::NAME))]
    fn render<T: Template>(&self, template: &T) -> anyhow::Result<String> {
        let context = tera::Context::from_serialize(template)?;
        self.tera.render(T::NAME, &context).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use folio_templates_contracts::{ContactHtmlTemplate, ContactTextTemplate};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn contact_text() {
        // Arrange
        let sut = TemplateServiceImpl::new().unwrap();

        // Act
        let result = sut.render(&ContactTextTemplate {
            name: "Max Mustermann".into(),
            email: "max@example.de".into(),
            message: "Hello <World>!\nSecond line".into(),
        });

        // Assert
        assert_eq!(
            result.unwrap(),
            "From: Max Mustermann <max@example.de>\n\nHello <World>!\nSecond line"
        );
    }

    #[test]
    fn contact_html() {
        // Arrange
        let sut = TemplateServiceImpl::new().unwrap();

        // Act
        let result = sut
            .render(&ContactHtmlTemplate {
                name: "Max".into(),
                email: "max@example.de".into(),
                subject: "Hi".into(),
                lines: vec!["Hello".into(), "<script>alert(1)</script>".into()],
            })
            .unwrap();

        // Assert
        assert!(result.contains(concat!(
            "<p><strong>From:</strong> Max &lt;max@example.de&gt;</p>",
            "<p><strong>Message:</strong></p>",
        )));
        assert!(result.contains("<p>Hello<br/>&lt;script&gt;alert(1)&lt;&#x2F;script&gt;</p>"));
        assert!(!result.contains("<script>"));
    }
}
