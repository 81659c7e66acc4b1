/// Raid planner and raid calculator pages
use crate::gui::{styles, Message, Page};
use crate::raid::{self, Method, RaidEstimate, Structure, COUNT_RANGE};
use iced::{
    widget::{Button, Column, Container, PickList, Row, Space, Text, TextInput},
    Alignment, Element, Font, Length,
};

#[derive(Debug, Clone, PartialEq)]
pub enum CalculatorMessage {
    StructureSelected(Structure),
    MethodSelected(Method),
    CountChanged(String),
    Increment,
    Decrement,
}

/// Inputs of the raid calculator
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorForm {
    pub structure: Structure,
    pub method: Method,
    pub count_input: String,
}

impl Default for CalculatorForm {
    fn default() -> Self {
        CalculatorForm {
            structure: Structure::default(),
            method: Method::Rockets,
            count_input: "1".to_string(),
        }
    }
}

impl CalculatorForm {
    pub fn count(&self) -> u32 {
        raid::parse_count(&self.count_input)
    }

    pub fn estimate(&self) -> RaidEstimate {
        raid::estimate(self.structure, self.method, self.count())
    }

    pub fn update(&mut self, message: CalculatorMessage) {
        match message {
            CalculatorMessage::StructureSelected(structure) => self.structure = structure,
            CalculatorMessage::MethodSelected(method) => self.method = method,
            CalculatorMessage::CountChanged(input) => {
                // Digits only; the field may be empty while typing
                if input.chars().all(|c| c.is_ascii_digit()) && input.len() <= 3 {
                    self.count_input = input;
                }
            }
            CalculatorMessage::Increment => {
                let count = (self.count() + 1).min(*COUNT_RANGE.end());
                self.count_input = count.to_string();
            }
            CalculatorMessage::Decrement => {
                let count = self.count().saturating_sub(1).max(*COUNT_RANGE.start());
                self.count_input = count.to_string();
            }
        }
    }
}

fn report_box<'a>(report: String, dark: bool) -> Element<'a, Message> {
    Container::new(Text::new(report).font(Font::MONOSPACE).size(14))
        .width(Length::Fill)
        .padding(12)
        .style(styles::panel(dark))
        .into()
}

fn close_row<'a>() -> Element<'a, Message> {
    Row::new()
        .push(Space::new(Length::Fill, Length::Shrink))
        .push(
            Button::new(Text::new("Close"))
                .on_press(Message::NavigateTo(Page::Home))
                .padding(10),
        )
        .into()
}

pub fn planner_view<'a>(structure: Structure, dark: bool) -> Element<'a, Message> {
    Column::new()
        .spacing(10)
        .padding(14)
        .push(Text::new("Raid Planner").size(20))
        .push(Text::new("Quick reference for common raid costs (approx).").size(13))
        .push(
            Row::new()
                .spacing(10)
                .align_items(Alignment::Center)
                .push(Text::new("Structure"))
                .push(Space::new(Length::Fill, Length::Shrink))
                .push(
                    PickList::new(
                        Structure::ALL.to_vec(),
                        Some(structure),
                        Message::PlannerStructureSelected,
                    )
                    .width(Length::Fixed(220.0)),
                ),
        )
        .push(report_box(raid::planner_report(structure), dark))
        .push(close_row())
        .into()
}

pub fn calculator_view(form: &CalculatorForm, dark: bool) -> Element<'_, Message> {
    let selectors = Row::new()
        .spacing(10)
        .align_items(Alignment::Center)
        .push(Text::new("Structure"))
        .push(
            PickList::new(Structure::ALL.to_vec(), Some(form.structure), |s| {
                Message::Calculator(CalculatorMessage::StructureSelected(s))
            })
            .width(Length::Fixed(170.0)),
        )
        .push(Text::new("Method"))
        .push(
            PickList::new(Method::ALL.to_vec(), Some(form.method), |m| {
                Message::Calculator(CalculatorMessage::MethodSelected(m))
            })
            .width(Length::Fixed(150.0)),
        );

    let count = Row::new()
        .spacing(8)
        .align_items(Alignment::Center)
        .push(Text::new("Count"))
        .push(
            TextInput::new("1", &form.count_input)
                .on_input(|input| Message::Calculator(CalculatorMessage::CountChanged(input)))
                .width(Length::Fixed(70.0))
                .padding(6),
        )
        .push(
            Button::new(Text::new("-"))
                .on_press(Message::Calculator(CalculatorMessage::Decrement))
                .padding([4, 12]),
        )
        .push(
            Button::new(Text::new("+"))
                .on_press(Message::Calculator(CalculatorMessage::Increment))
                .padding([4, 12]),
        );

    Column::new()
        .spacing(10)
        .padding(14)
        .push(Text::new("Raid Calculator").size(20))
        .push(Text::new("Estimate sulfur + gunpowder totals.").size(13))
        .push(selectors)
        .push(count)
        .push(report_box(form.estimate().report(), dark))
        .push(close_row())
        .into()
}
