//! Form model
//!
//! A snapshot of a `<form>` element: its target, method and controls. Values
//! are filled in locally and sent when the session submits the form.

use crate::browser::parse_selector;
use crate::url::resolve_url;
use crate::E2eError;
use scraper::{ElementRef, Html, Selector};

/// Control types that are never filled or sent as ordinary fields
const NON_TEXT_KINDS: &[&str] = &["submit", "button", "reset", "image", "file", "hidden", "checkbox", "radio"];

/// HTTP method a form submits with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMethod {
    Get,
    Post,
}

impl FormMethod {
    fn from_attr(value: Option<&str>) -> Self {
        match value {
            Some(m) if m.eq_ignore_ascii_case("post") => Self::Post,
            _ => Self::Get,
        }
    }
}

/// A single form control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    /// Value of the `name` attribute
    pub name: Option<String>,

    /// Lowercased input type; `textarea`, `select` and `button` types for other tags
    pub kind: String,

    /// Current value
    pub value: String,

    /// Checked state for checkboxes and radio buttons
    pub checked: bool,
}

impl FormField {
    fn from_element(element: ElementRef<'_>) -> Self {
        let value = element.value();
        let kind = match value.name() {
            "textarea" => "textarea".to_string(),
            "select" => "select".to_string(),
            // <button> without a type submits the form
            "button" => value.attr("type").unwrap_or("submit").to_ascii_lowercase(),
            _ => value.attr("type").unwrap_or("text").to_ascii_lowercase(),
        };

        let current = match value.name() {
            "textarea" => element.text().collect::<String>(),
            "select" => selected_option(element),
            _ => value.attr("value").unwrap_or("").to_string(),
        };

        Self {
            name: value.attr("name").map(str::to_string),
            kind,
            value: current,
            checked: value.attr("checked").is_some(),
        }
    }

    /// Returns true if the control submits its form
    pub fn is_submit(&self) -> bool {
        self.kind == "submit" || self.kind == "image"
    }

    /// Returns true if the control accepts typed text
    pub fn is_fillable(&self) -> bool {
        !NON_TEXT_KINDS.contains(&self.kind.as_str())
    }
}

fn selected_option(select: ElementRef<'_>) -> String {
    let Ok(selector) = Selector::parse("option") else {
        return String::new();
    };
    let options: Vec<ElementRef<'_>> = select.select(&selector).collect();

    options
        .iter()
        .find(|option| option.value().attr("selected").is_some())
        .or_else(|| options.first())
        .map(|option| {
            option
                .value()
                .attr("value")
                .map(str::to_string)
                .unwrap_or_else(|| option.text().collect::<String>().trim().to_string())
        })
        .unwrap_or_default()
}

fn control_selector() -> Result<Selector, E2eError> {
    parse_selector("input, textarea, select, button")
}

/// A form ready to be filled and submitted
#[derive(Debug, Clone)]
pub struct Form {
    action: String,
    method: FormMethod,
    html: String,
    fields: Vec<FormField>,
}

impl Form {
    /// Builds the model from a parsed `<form>` element
    ///
    /// A missing or empty `action` targets the page itself; relative actions
    /// are resolved against `page_url`.
    pub(crate) fn from_element(element: ElementRef<'_>, page_url: &str) -> Result<Self, E2eError> {
        let action = match element.value().attr("action").map(str::trim) {
            Some(action) if !action.is_empty() => resolve_url(action, page_url)?,
            _ => page_url.to_string(),
        };

        let html = element.html();
        let fields = Self::control_elements(&Html::parse_fragment(&html))?
            .into_iter()
            .map(FormField::from_element)
            .collect();

        Ok(Self {
            action,
            method: FormMethod::from_attr(element.value().attr("method")),
            html,
            fields,
        })
    }

    fn control_elements(fragment: &Html) -> Result<Vec<ElementRef<'_>>, E2eError> {
        let selector = control_selector()?;
        Ok(fragment.select(&selector).collect())
    }

    /// Index of the first control matching `css`
    fn position_of(&self, css: &str) -> Result<usize, E2eError> {
        let target = parse_selector(css)?;
        let fragment = Html::parse_fragment(&self.html);
        let controls = Self::control_elements(&fragment)?;

        let matched = fragment
            .select(&target)
            .find_map(|element| controls.iter().position(|c| c.id() == element.id()));

        matched.ok_or_else(|| E2eError::ElementNotFound {
            selector: css.to_string(),
            url: self.action.clone(),
        })
    }

    /// Absolute URL the form submits to
    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn method(&self) -> FormMethod {
        self.method
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Sets the value of the first text control matching `css`
    pub fn fill(&mut self, css: &str, value: &str) -> Result<(), E2eError> {
        let index = self.position_of(css)?;
        let field = &mut self.fields[index];

        if !field.is_fillable() {
            return Err(E2eError::Assertion(format!(
                "{} matches a {} control, which cannot be filled",
                css, field.kind
            )));
        }

        field.value = value.to_string();
        Ok(())
    }

    /// Returns the value of the first control matching `css`
    pub fn value_of(&self, css: &str) -> Result<&str, E2eError> {
        let index = self.position_of(css)?;
        Ok(&self.fields[index].value)
    }

    /// Returns true if the form has a submit button
    pub fn has_submit_control(&self) -> bool {
        self.fields.iter().any(FormField::is_submit)
    }

    /// Name/value pairs sent on submission
    ///
    /// Unnamed controls, buttons and unchecked checkboxes or radios are left
    /// out. The first named submit button is included, as a click on it
    /// would.
    pub fn submission(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .fields
            .iter()
            .filter_map(|field| {
                let name = field.name.as_ref()?;
                let include = match field.kind.as_str() {
                    "checkbox" | "radio" => field.checked,
                    "submit" | "button" | "reset" | "image" | "file" => false,
                    _ => true,
                };
                include.then(|| (name.clone(), field.value.clone()))
            })
            .collect();

        if let Some(button) = self
            .fields
            .iter()
            .find(|field| field.is_submit() && field.name.is_some())
        {
            if let Some(name) = &button.name {
                pairs.push((name.clone(), button.value.clone()));
            }
        }

        pairs
    }
}
