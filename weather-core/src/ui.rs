//! The element sink the presenter writes into, and an in-memory page that
//! implements it.

use std::collections::HashMap;

/// Named elements of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    CityInput,
    ErrorMessage,
    LoadingSpinner,

    CurrentWeather,
    CurrentCity,
    CurrentDate,
    CurrentIcon,
    CurrentTemp,
    CurrentDescription,
    FeelsLike,
    CurrentHumidity,
    CurrentWindSpeed,
    CurrentVisibility,
    CurrentPressure,

    ForecastSection,
    ForecastContainer,

    RecentCitiesDropdown,
    RecentCitiesList,
}

impl ElementId {
    /// Elements that start out hidden.
    pub const INITIALLY_HIDDEN: [ElementId; 5] = [
        ElementId::ErrorMessage,
        ElementId::LoadingSpinner,
        ElementId::CurrentWeather,
        ElementId::ForecastSection,
        ElementId::RecentCitiesDropdown,
    ];
}

/// One day in the forecast strip, already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastCard {
    pub date: String,
    pub icon: String,
    pub max: String,
    pub min: String,
    pub humidity: String,
    pub wind: String,
}

/// Child element appended to a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Forecast(ForecastCard),
    RecentCity(String),
}

/// Minimal set of page operations the presenter needs.
pub trait Surface {
    fn set_text(&mut self, id: ElementId, text: &str);
    fn set_visible(&mut self, id: ElementId, visible: bool);
    fn clear_children(&mut self, id: ElementId);
    fn append_child(&mut self, id: ElementId, node: Node);
    /// Toggle the "invalid input" cue on an element.
    fn set_invalid(&mut self, id: ElementId, invalid: bool);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub text: String,
    pub hidden: bool,
    pub invalid: bool,
    pub children: Vec<Node>,
}

/// Page state held in memory. Front ends render it however they like.
#[derive(Debug, Clone)]
pub struct Page {
    elements: HashMap<ElementId, Element>,
}

impl Default for Page {
    fn default() -> Self {
        let mut page = Self { elements: HashMap::new() };
        for id in ElementId::INITIALLY_HIDDEN {
            page.element_mut(id).hidden = true;
        }
        page
    }
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn text(&self, id: ElementId) -> &str {
        self.element(id).map(|e| e.text.as_str()).unwrap_or("")
    }

    pub fn is_visible(&self, id: ElementId) -> bool {
        self.element(id).is_none_or(|e| !e.hidden)
    }

    pub fn is_invalid(&self, id: ElementId) -> bool {
        self.element(id).is_some_and(|e| e.invalid)
    }

    pub fn children(&self, id: ElementId) -> &[Node] {
        self.element(id).map(|e| e.children.as_slice()).unwrap_or(&[])
    }

    fn element_mut(&mut self, id: ElementId) -> &mut Element {
        self.elements.entry(id).or_default()
    }
}

impl Surface for Page {
    fn set_text(&mut self, id: ElementId, text: &str) {
        self.element_mut(id).text = text.to_string();
    }

    fn set_visible(&mut self, id: ElementId, visible: bool) {
        self.element_mut(id).hidden = !visible;
    }

    fn clear_children(&mut self, id: ElementId) {
        self.element_mut(id).children.clear();
    }

    fn append_child(&mut self, id: ElementId, node: Node) {
        self.element_mut(id).children.push(node);
    }

    fn set_invalid(&mut self, id: ElementId, invalid: bool) {
        self.element_mut(id).invalid = invalid;
    }
}
