/// ICED GUI Application Module
///
/// Architecture:
/// - One window with a home page and three sub pages (settings, raid planner,
///   raid calculator)
/// - Every crosshair control emits a `SettingChange`; `Preferences::apply` is the
///   only place the record is mutated, and each change is pushed straight to
///   the overlay as a live preview
/// - Closing the window saves the preferences and shuts the overlay down
pub mod dialogs;
pub mod raid_tools;
pub mod styles;

use crate::config::AppPaths;
use crate::crosshair_overlay::{Launcher, OverlaySupervisor, SystemLauncher};
use crate::preferences::{
    CrosshairColor, CrosshairStyle, Preferences, SettingChange, SettingsStore, OPACITY_RANGE,
    OUTLINE_RANGE, SIZE_RANGE,
};
use crate::raid::Structure;
use crate::APP_NAME;
use dialogs::Notice;
use iced::{
    event, executor,
    widget::{image, Button, Column, Container, Image, PickList, Slider, Space, Text},
    window, Application, Command, Element, Event, Length, Settings, Subscription, Theme,
};
use raid_tools::{CalculatorForm, CalculatorMessage};
use std::path::PathBuf;

const SUBTITLE: &str = "the nonkoreanspywarefree crosshair brought to you by void";

/// Startup flags for the GUI application
#[derive(Debug, Clone)]
pub struct GuiFlags {
    pub paths: AppPaths,
}

/// Application pages for navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Settings,
    RaidPlanner,
    RaidCalculator,
}

#[derive(Debug, Clone)]
pub enum Message {
    NavigateTo(Page),

    // Main actions
    ToggleCrosshair,
    SaveSettings,
    ToggleTheme,
    Exit,
    CloseRequested,

    // Crosshair controls
    Setting(SettingChange),

    // Raid tools
    PlannerStructureSelected(Structure),
    Calculator(CalculatorMessage),
}

/// Side effects `update` has to carry out after handling a message
#[derive(Debug, Default, PartialEq)]
struct Outcome {
    notice: Option<Notice>,
    close: bool,
}

pub struct ControlPanel<L = SystemLauncher> {
    prefs: Preferences,
    store: SettingsStore,
    overlay: OverlaySupervisor<L>,
    page: Page,
    planner_structure: Structure,
    calculator: CalculatorForm,
    banner: Option<PathBuf>,
    status_message: String,
}

impl<L: Launcher> ControlPanel<L> {
    fn start(store: SettingsStore, mut overlay: OverlaySupervisor<L>, banner: Option<PathBuf>) -> Self {
        let mut prefs = store.load();
        sync_overlay_on_launch(&mut overlay, &mut prefs);

        ControlPanel {
            prefs,
            store,
            overlay,
            page: Page::Home,
            planner_structure: Structure::default(),
            calculator: CalculatorForm::default(),
            banner,
            status_message: "Ready".to_string(),
        }
    }

    fn toggle_label(&self) -> &'static str {
        if self.prefs.enabled {
            "Crosshair: ON (click to turn OFF)"
        } else {
            "Crosshair: OFF (click to turn ON)"
        }
    }

    fn handle(&mut self, message: Message) -> Outcome {
        match message {
            Message::NavigateTo(page) => {
                self.page = page;
            }

            Message::ToggleCrosshair => {
                let enable = !self.prefs.enabled;
                match self.overlay.set_enabled(&mut self.prefs, enable) {
                    Ok(()) => {
                        self.status_message = if self.prefs.enabled {
                            "Crosshair enabled".to_string()
                        } else {
                            "Crosshair disabled".to_string()
                        };
                    }
                    Err(e) => {
                        self.status_message = format!("Toggle failed: {}", e);
                        return Outcome {
                            notice: Some(Notice::Error(e.to_string())),
                            close: false,
                        };
                    }
                }
            }

            Message::Setting(change) => {
                if self.prefs.apply(change) {
                    self.overlay.preview(&self.prefs);
                }
            }

            Message::SaveSettings => match self.store.save(&self.prefs) {
                Ok(()) => {
                    self.status_message = "Settings saved".to_string();
                    return Outcome {
                        notice: Some(Notice::Info("Saved.".to_string())),
                        close: false,
                    };
                }
                Err(e) => {
                    self.status_message = "Saving failed".to_string();
                    return Outcome {
                        notice: Some(Notice::Error(e.to_string())),
                        close: false,
                    };
                }
            },

            Message::ToggleTheme => {
                self.prefs.dark_mode = !self.prefs.dark_mode;
            }

            Message::Exit | Message::CloseRequested => {
                self.close();
                return Outcome {
                    notice: None,
                    close: true,
                };
            }

            Message::PlannerStructureSelected(structure) => {
                self.planner_structure = structure;
            }

            Message::Calculator(message) => {
                self.calculator.update(message);
            }
        }

        Outcome::default()
    }

    /// Persist preferences, then hide and stop the overlay
    fn close(&mut self) {
        if let Err(e) = self.store.save(&self.prefs) {
            tracing::warn!("Failed to save settings on exit: {}", e);
        }
        self.overlay.shutdown(&mut self.prefs);
        tracing::info!("Control panel closed");
    }

    fn home_view(&self) -> Element<'_, Message> {
        let colors = styles::colors(self.prefs.dark_mode);

        let mut header = Column::new().spacing(4);
        if let Some(ref banner) = self.banner {
            header = header.push(
                Image::new(image::Handle::from_path(banner))
                    .width(Length::Fixed(400.0))
                    .height(Length::Fixed(80.0)),
            );
        }
        header = header
            .push(Text::new("Version 1.0").size(22))
            .push(Text::new(SUBTITLE).size(12).style(colors.subtext))
            .push(Space::new(Length::Fill, Length::Fixed(6.0)))
            .push(
                Container::new(Space::new(Length::Fill, Length::Fixed(3.0)))
                    .width(Length::Fill)
                    .style(styles::accent_bar()),
            );

        let buttons = Column::new()
            .spacing(12)
            .padding(14)
            .push(
                Button::new(Text::new(self.toggle_label()))
                    .on_press(Message::ToggleCrosshair)
                    .width(Length::Fill)
                    .padding(10),
            )
            .push(menu_button("Raid Planner", Message::NavigateTo(Page::RaidPlanner)))
            .push(menu_button("Raid Calculator", Message::NavigateTo(Page::RaidCalculator)))
            .push(menu_button("Settings", Message::NavigateTo(Page::Settings)))
            .push(menu_button("Save Settings", Message::SaveSettings))
            .push(menu_button("Dark / Light Mode", Message::ToggleTheme))
            .push(menu_button("Exit", Message::Exit));

        Column::new()
            .spacing(8)
            .padding(14)
            .push(header)
            .push(
                Container::new(buttons)
                    .width(Length::Fill)
                    .style(styles::panel(self.prefs.dark_mode)),
            )
            .push(Text::new(&self.status_message).size(12).style(colors.subtext))
            .into()
    }

    fn settings_view(&self) -> Element<'_, Message> {
        let prefs = &self.prefs;

        let controls = Column::new()
            .spacing(8)
            .padding(14)
            .push(Text::new("Style"))
            .push(
                PickList::new(CrosshairStyle::ALL.to_vec(), Some(prefs.style), |style| {
                    Message::Setting(SettingChange::Style(style))
                })
                .width(Length::Fill),
            )
            .push(Text::new(format!("Size: {}", prefs.size)))
            .push(Slider::new(SIZE_RANGE, prefs.size, |size| {
                Message::Setting(SettingChange::Size(size))
            }))
            .push(Text::new("Color"))
            .push(
                PickList::new(CrosshairColor::ALL.to_vec(), Some(prefs.color), |color| {
                    Message::Setting(SettingChange::Color(color))
                })
                .width(Length::Fill),
            )
            .push(Text::new(format!("Opacity: {:.2}", prefs.opacity)))
            .push(
                Slider::new(OPACITY_RANGE, prefs.opacity, |opacity| {
                    Message::Setting(SettingChange::Opacity(opacity))
                })
                .step(0.01),
            )
            .push(Text::new(format!("Outline / Border: {}", prefs.outline)))
            .push(Slider::new(OUTLINE_RANGE, prefs.outline, |outline| {
                Message::Setting(SettingChange::Outline(outline))
            }))
            .push(Space::new(Length::Fill, Length::Fixed(10.0)))
            .push(
                Button::new(Text::new("Close"))
                    .on_press(Message::NavigateTo(Page::Home))
                    .padding(10),
            );

        Column::new()
            .padding(14)
            .push(
                Container::new(controls)
                    .width(Length::Fill)
                    .style(styles::panel(prefs.dark_mode)),
            )
            .into()
    }
}

fn menu_button(label: &str, message: Message) -> Button<'_, Message> {
    Button::new(Text::new(label))
        .on_press(message)
        .width(Length::Fill)
        .padding(10)
        .style(iced::theme::Button::Secondary)
}

/// Publish the loaded state and restart the overlay if it was left enabled.
/// A failed start never blocks the launch; the crosshair is switched off instead.
fn sync_overlay_on_launch<L: Launcher>(overlay: &mut OverlaySupervisor<L>, prefs: &mut Preferences) {
    if prefs.enabled {
        if let Err(e) = overlay.set_enabled(prefs, true) {
            tracing::warn!("Could not restore crosshair at launch: {}", e);
        } else {
            return;
        }
    }

    if let Err(e) = overlay.write_config(prefs) {
        tracing::warn!("Failed to write overlay config at launch: {}", e);
    }
}

fn window_events(event: Event, _status: event::Status) -> Option<Message> {
    match event {
        Event::Window(_, window::Event::CloseRequested) => Some(Message::CloseRequested),
        _ => None,
    }
}

impl Application for ControlPanel {
    type Executor = executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = GuiFlags;

    fn new(flags: GuiFlags) -> (Self, Command<Message>) {
        let paths = flags.paths;
        tracing::info!("Application directory: {:?}", paths.base_dir());

        let store = SettingsStore::new(paths.settings_file());
        let banner = paths.banner();
        let overlay = OverlaySupervisor::new(paths);

        (ControlPanel::start(store, overlay, banner), Command::none())
    }

    fn title(&self) -> String {
        String::from(APP_NAME)
    }

    fn theme(&self) -> Theme {
        styles::theme(self.prefs.dark_mode)
    }

    fn subscription(&self) -> Subscription<Message> {
        event::listen_with(window_events)
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        let outcome = self.handle(message);

        if let Some(ref notice) = outcome.notice {
            dialogs::show(notice);
        }

        if outcome.close {
            window::close(window::Id::MAIN)
        } else {
            Command::none()
        }
    }

    fn view(&self) -> Element<Message> {
        let dark = self.prefs.dark_mode;
        let content = match self.page {
            Page::Home => self.home_view(),
            Page::Settings => self.settings_view(),
            Page::RaidPlanner => raid_tools::planner_view(self.planner_structure, dark),
            Page::RaidCalculator => raid_tools::calculator_view(&self.calculator, dark),
        };

        Container::new(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

pub fn run(flags: GuiFlags) -> iced::Result {
    ControlPanel::run(Settings {
        window: window::Settings {
            size: iced::Size::new(460.0, 720.0),
            resizable: false,
            exit_on_close_request: false,
            ..Default::default()
        },
        ..Settings::with_flags(flags)
    })
}
