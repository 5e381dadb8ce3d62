use iced::widget::image::Handle;
use iced::widget::{button, column, container, horizontal_space, row, scrollable, text, Column};
use iced::{Alignment, Element, Length, Size, Task, Theme};
use rfd::FileDialog;
use std::time::Duration;

mod api;
mod config;
mod host;
mod labels;
mod photo;
mod state;
mod ui;

use api::client::SheetClient;
use api::types::{ApiResponse, AssetBundle, AssetKind, ResponseStatus, UserCheck};
use config::ScriptConfig;
use host::HostBridge;
use photo::UploadedImage;
use state::form::{Day2Form, Day2Slot, HomeworkForm, ImageSlot};
use state::session::SessionStore;

/// How long the restoring screen may block before falling back to the form.
/// The verification itself keeps running; only the screen is unblocked.
const RESTORE_TIMEOUT: Duration = Duration::from_secs(8);

/// Shortest nick worth checking against the participant list
const MIN_NICK_LEN: usize = 3;

/// Mutually exclusive render branches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    /// Endpoint not configured; blocks everything else
    Setup,
    /// Verifying a saved session nick against the backend
    Restoring,
    /// The day-1 homework form
    Form,
    /// Post-submission menu with the stage-2 actions
    Menu,
    /// A peer's bundle has been received
    Exchange,
    /// The day-2 submission form
    Day2Form,
    /// Day-2 work accepted
    Day2Success,
}

/// Which form a picked image belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotRef {
    Day1(ImageSlot),
    Day2(Day2Slot),
}

impl SlotRef {
    fn label(self) -> &'static str {
        match self {
            SlotRef::Day1(slot) => slot.label(),
            SlotRef::Day2(slot) => slot.label(),
        }
    }
}

/// Downloaded previews of the received bundle
#[derive(Debug, Clone, Default)]
struct AssetPreviews {
    base: Option<Handle>,
    angle1: Option<Handle>,
    angle2: Option<Handle>,
    angle3: Option<Handle>,
}

impl AssetPreviews {
    fn get(&self, kind: AssetKind) -> Option<&Handle> {
        match kind {
            AssetKind::Base => self.base.as_ref(),
            AssetKind::Angle1 => self.angle1.as_ref(),
            AssetKind::Angle2 => self.angle2.as_ref(),
            AssetKind::Angle3 => self.angle3.as_ref(),
        }
    }

    fn set(&mut self, kind: AssetKind, value: Option<Handle>) {
        match kind {
            AssetKind::Base => self.base = value,
            AssetKind::Angle1 => self.angle1 = value,
            AssetKind::Angle2 => self.angle2 = value,
            AssetKind::Angle3 => self.angle3 = value,
        }
    }
}

/// Main application state
struct HomeworkApp {
    screen: Screen,
    /// Present once the endpoint URL is configured
    client: Option<SheetClient>,
    session: SessionStore,
    bridge: Option<HostBridge>,

    form: HomeworkForm,
    day2: Day2Form,
    /// The slot currently encoding a picked file, if any
    encoding: Option<SlotRef>,

    checking_user: bool,
    user_exists_warning: bool,
    is_day2_active: bool,
    welcome_back: bool,

    submitting: bool,
    fetching_asset: bool,
    sending_to_chat: bool,

    error_message: String,
    relay_notice: String,

    received_assets: Option<AssetBundle>,
    received_author: String,
    previews: AssetPreviews,

    /// A session verification result is still welcome
    restore_pending: bool,
    /// The timeout fallback already fired (it fires at most once)
    restore_fallback_done: bool,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// Re-read the endpoint configuration from the setup screen
    RetrySetup,
    /// The startup verification of a saved nick came back
    SessionVerified(UserCheck),
    /// The restoring screen waited long enough
    RestoreTimedOut,

    NickChanged(String),
    /// The nick field was committed (Enter)
    NickCommitted,
    UserChecked(UserCheck),

    PickImage(SlotRef),
    ImageLoaded(SlotRef, Result<UploadedImage, String>),
    ClearImage(SlotRef),

    SubmitPressed,
    SubmitFinished(Result<ApiResponse, String>),
    SkipToDay2,

    FetchAssetPressed,
    AssetFetched(Result<ApiResponse, String>),
    PreviewLoaded(AssetKind, Option<Handle>),
    OpenAsset(String),

    SendToChatPressed,
    RelayFinished(Result<(), String>),

    ProceedToDay2Form,
    Day2SubmitPressed,
    Day2SubmitFinished(Result<ApiResponse, String>),

    Logout,
}

impl HomeworkApp {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let bridge = host::detect();
        if let Some(bridge) = &bridge {
            bridge.ready();
        }

        let mut app = Self::with_parts(config::load(), SessionStore::new(), bridge);
        let task = app.startup_task();
        (app, task)
    }

    /// Assemble the app from explicit parts (tests inject their own)
    fn with_parts(
        config: Option<ScriptConfig>,
        session: SessionStore,
        bridge: Option<HostBridge>,
    ) -> Self {
        let client = config.map(|cfg| SheetClient::new(cfg.script_url));
        let screen = if client.is_some() { Screen::Form } else { Screen::Setup };

        HomeworkApp {
            screen,
            client,
            session,
            bridge,
            form: HomeworkForm::default(),
            day2: Day2Form::default(),
            encoding: None,
            checking_user: false,
            user_exists_warning: false,
            is_day2_active: false,
            welcome_back: false,
            submitting: false,
            fetching_asset: false,
            sending_to_chat: false,
            error_message: String::new(),
            relay_notice: String::new(),
            received_assets: None,
            received_author: String::new(),
            previews: AssetPreviews::default(),
            restore_pending: false,
            restore_fallback_done: false,
        }
    }

    /// Expand for the host and kick off the session restore, if any
    fn startup_task(&mut self) -> Task<Message> {
        let mut tasks = Vec::new();

        if self.bridge.is_some() {
            // Viewport expansion requested by the embedding host
            tasks.push(
                iced::window::get_latest()
                    .and_then(|id| iced::window::maximize::<Message>(id, true))
                    .discard(),
            );
        }

        if let Some(client) = self.client.clone() {
            if let Some(nick) = self.session.load() {
                self.form.telegram_nick = nick.clone();
                self.screen = Screen::Restoring;
                self.restore_pending = true;
                self.restore_fallback_done = false;

                tasks.push(Task::perform(
                    async move { client.check_user(&nick).await },
                    Message::SessionVerified,
                ));
                tasks.push(Task::perform(tokio::time::sleep(RESTORE_TIMEOUT), |_| {
                    Message::RestoreTimedOut
                }));
            }
        }

        Task::batch(tasks)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::RetrySetup => match config::load() {
                Some(cfg) => {
                    println!("🔁 Endpoint configured, leaving setup");
                    self.client = Some(SheetClient::new(cfg.script_url));
                    self.screen = Screen::Form;
                    self.startup_task()
                }
                None => Task::none(),
            },

            Message::SessionVerified(check) => {
                if !self.restore_pending {
                    return Task::none();
                }
                self.restore_pending = false;

                if check.is_day2_active {
                    self.is_day2_active = true;
                }

                if check.exists {
                    println!("✅ Session confirmed for {}", self.form.telegram_nick);
                    self.welcome_back = true;
                    self.screen = Screen::Menu;
                } else if self.screen == Screen::Restoring {
                    // Saved nick unknown to the backend: start over on the form
                    self.screen = Screen::Form;
                }
                Task::none()
            }

            Message::RestoreTimedOut => {
                if self.screen == Screen::Restoring && !self.restore_fallback_done {
                    println!("⏱️  Session check is slow, showing the form");
                    self.restore_fallback_done = true;
                    self.screen = Screen::Form;
                }
                Task::none()
            }

            Message::NickChanged(value) => {
                self.form.telegram_nick = value;
                // Editing the nick invalidates both the warning and any
                // still-running session verification
                self.user_exists_warning = false;
                self.restore_pending = false;
                Task::none()
            }

            Message::NickCommitted => {
                let nick = self.form.telegram_nick.trim().to_string();
                let Some(client) = self.client.clone() else {
                    return Task::none();
                };
                if nick.chars().count() < MIN_NICK_LEN || self.checking_user {
                    return Task::none();
                }

                self.checking_user = true;
                Task::perform(
                    async move { client.check_user(&nick).await },
                    Message::UserChecked,
                )
            }

            Message::UserChecked(check) => {
                self.checking_user = false;
                self.user_exists_warning = check.exists;
                if check.is_day2_active {
                    self.is_day2_active = true;
                }
                Task::none()
            }

            Message::PickImage(slot) => {
                if self.encoding.is_some() {
                    return Task::none();
                }

                let picked = FileDialog::new()
                    .set_title(slot.label())
                    .add_filter("Images", &["png", "jpg", "jpeg"])
                    .pick_file();

                match picked {
                    Some(path) => {
                        self.encoding = Some(slot);
                        Task::perform(photo::load_image(path), move |result| {
                            Message::ImageLoaded(slot, result)
                        })
                    }
                    None => Task::none(),
                }
            }

            Message::ImageLoaded(slot, result) => {
                if self.encoding == Some(slot) {
                    self.encoding = None;
                }
                match result {
                    Ok(image) => {
                        self.set_slot(slot, Some(image));
                        self.error_message.clear();
                    }
                    Err(e) => self.error_message = e,
                }
                Task::none()
            }

            Message::ClearImage(slot) => {
                self.set_slot(slot, None);
                Task::none()
            }

            Message::SubmitPressed => {
                if self.submitting {
                    return Task::none();
                }

                let Some(payload) = self.form.payload() else {
                    self.error_message = validation_message(self.form.first_missing());
                    return Task::none();
                };
                let Some(client) = self.client.clone() else {
                    return Task::none();
                };

                self.submitting = true;
                self.welcome_back = false;
                self.error_message.clear();
                Task::perform(
                    async move { client.submit_day1(&payload).await.map_err(|e| e.to_string()) },
                    Message::SubmitFinished,
                )
            }

            Message::SubmitFinished(result) => {
                self.submitting = false;
                match result {
                    Ok(response) => {
                        println!("✅ Day-1 homework accepted");
                        if let Err(e) = self.session.save(&self.form.telegram_nick) {
                            eprintln!("⚠️  Could not persist session: {}", e);
                        }
                        if response.is_day2_active == Some(true) {
                            self.is_day2_active = true;
                        }
                        self.user_exists_warning = false;
                        self.error_message.clear();
                        self.screen = Screen::Menu;
                    }
                    Err(e) => {
                        eprintln!("❌ Day-1 submit failed: {}", e);
                        self.error_message = e;
                    }
                }
                Task::none()
            }

            Message::SkipToDay2 => {
                if !self.is_day2_active {
                    return Task::none();
                }
                if let Err(e) = self.session.save(&self.form.telegram_nick) {
                    eprintln!("⚠️  Could not persist session: {}", e);
                }
                self.welcome_back = true;
                self.error_message.clear();
                self.screen = Screen::Menu;
                Task::none()
            }

            Message::FetchAssetPressed => {
                if !self.is_day2_active || self.fetching_asset {
                    return Task::none();
                }
                let Some(client) = self.client.clone() else {
                    return Task::none();
                };

                let nick = self.form.telegram_nick.trim().to_string();
                self.fetching_asset = true;
                self.error_message.clear();
                Task::perform(
                    async move {
                        client
                            .fetch_random_asset(&nick)
                            .await
                            .map_err(|e| e.to_string())
                    },
                    Message::AssetFetched,
                )
            }

            Message::AssetFetched(result) => {
                self.fetching_asset = false;
                match result {
                    Ok(response) => {
                        if response.status == ResponseStatus::Success {
                            if let Some(assets) = response.assets {
                                println!("🎁 Bundle received");

                                self.received_author = response
                                    .author_nick
                                    .filter(|nick| !nick.trim().is_empty())
                                    .unwrap_or_else(|| labels::ANONYMOUS_AUTHOR.to_string());
                                self.received_assets = Some(assets.clone());
                                self.previews = AssetPreviews::default();
                                self.relay_notice.clear();
                                self.error_message.clear();
                                self.screen = Screen::Exchange;

                                return self.preview_tasks(&assets);
                            }
                        }

                        self.error_message = response
                            .message
                            .filter(|m| !m.trim().is_empty())
                            .unwrap_or_else(|| labels::FETCH_FAILED_FALLBACK.to_string());
                    }
                    Err(e) => {
                        eprintln!("❌ Bundle fetch failed: {}", e);
                        self.error_message = e;
                    }
                }
                Task::none()
            }

            Message::PreviewLoaded(kind, handle) => {
                self.previews.set(kind, handle);
                Task::none()
            }

            Message::OpenAsset(url) => {
                host::open_link(&url);
                Task::none()
            }

            Message::SendToChatPressed => {
                if self.sending_to_chat || self.received_assets.is_none() {
                    return Task::none();
                }
                let (Some(client), Some(bridge)) = (self.client.clone(), self.bridge) else {
                    return Task::none();
                };

                let nick = self.form.telegram_nick.trim().to_string();
                self.sending_to_chat = true;
                self.relay_notice.clear();
                Task::perform(
                    async move {
                        client
                            .send_assets_to_chat(&nick, bridge.chat_id)
                            .await
                            .map(|_| ())
                            .map_err(|e| e.to_string())
                    },
                    Message::RelayFinished,
                )
            }

            Message::RelayFinished(result) => {
                self.sending_to_chat = false;
                self.relay_notice = match result {
                    Ok(()) => {
                        println!("📬 Bundle relayed to chat");
                        labels::SENT_TO_CHAT_MSG.to_string()
                    }
                    Err(e) => e,
                };
                Task::none()
            }

            Message::ProceedToDay2Form => {
                self.error_message.clear();
                self.screen = Screen::Day2Form;
                Task::none()
            }

            Message::Day2SubmitPressed => {
                if self.submitting {
                    return Task::none();
                }

                let nick = self.form.telegram_nick.clone();
                let Some(payload) = self.day2.payload(&nick) else {
                    self.error_message = validation_message(self.day2.first_missing());
                    return Task::none();
                };
                let Some(client) = self.client.clone() else {
                    return Task::none();
                };

                self.submitting = true;
                self.error_message.clear();
                Task::perform(
                    async move { client.submit_day2(&payload).await.map_err(|e| e.to_string()) },
                    Message::Day2SubmitFinished,
                )
            }

            Message::Day2SubmitFinished(result) => {
                self.submitting = false;
                match result {
                    Ok(_) => {
                        println!("🎉 Day-2 work accepted");
                        self.error_message.clear();
                        self.screen = Screen::Day2Success;
                    }
                    Err(e) => {
                        eprintln!("❌ Day-2 submit failed: {}", e);
                        self.error_message = e;
                    }
                }
                Task::none()
            }

            Message::Logout => {
                println!("👋 Logging out");
                self.session.clear();

                self.form = HomeworkForm::default();
                self.day2 = Day2Form::default();
                self.encoding = None;
                self.checking_user = false;
                self.user_exists_warning = false;
                self.is_day2_active = false;
                self.welcome_back = false;
                self.submitting = false;
                self.fetching_asset = false;
                self.sending_to_chat = false;
                self.error_message.clear();
                self.relay_notice.clear();
                self.received_assets = None;
                self.received_author.clear();
                self.previews = AssetPreviews::default();
                self.restore_pending = false;
                self.restore_fallback_done = false;

                self.screen = if self.client.is_some() {
                    Screen::Form
                } else {
                    Screen::Setup
                };
                Task::none()
            }
        }
    }

    fn set_slot(&mut self, slot: SlotRef, value: Option<UploadedImage>) {
        match slot {
            SlotRef::Day1(slot) => self.form.set_image(slot, value),
            SlotRef::Day2(slot) => self.day2.set_image(slot, value),
        }
    }

    /// Download the four bundle images for in-app previews
    fn preview_tasks(&self, assets: &AssetBundle) -> Task<Message> {
        let Some(client) = self.client.clone() else {
            return Task::none();
        };

        Task::batch(AssetKind::ALL.into_iter().map(|kind| {
            let client = client.clone();
            let url = assets.url(kind).to_string();
            Task::perform(
                async move {
                    match client.download_image(&url).await {
                        Ok(bytes) => photo::preview_from_bytes(&bytes),
                        Err(e) => {
                            eprintln!("⚠️  Preview download failed: {}", e);
                            None
                        }
                    }
                },
                move |handle| Message::PreviewLoaded(kind, handle),
            )
        }))
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let content = match self.screen {
            Screen::Setup => self.view_setup(),
            Screen::Restoring => self.view_restoring(),
            Screen::Form => self.view_form(),
            Screen::Menu => self.view_menu(),
            Screen::Exchange => self.view_exchange(),
            Screen::Day2Form => self.view_day2_form(),
            Screen::Day2Success => self.view_day2_success(),
        };

        scrollable(
            container(container(content).max_width(640).padding(24))
                .width(Length::Fill)
                .center_x(Length::Fill),
        )
        .into()
    }

    fn view_setup(&self) -> Element<Message> {
        let steps = format!(
            "1. Set the {} environment variable to your script URL, or\n\
             2. Write {{\"script_url\": \"...\"}} into {}\n\n\
             The URL comes from your script deployment and ends with /exec.",
            config::URL_ENV_VAR,
            config::config_path().display(),
        );

        column![
            text("⚙️").size(48),
            text(labels::SETUP_TITLE).size(28),
            text(labels::SETUP_MSG).size(16),
            container(text(steps).size(14))
                .style(container::bordered_box)
                .padding(16),
            button(text(labels::SETUP_RETRY_BTN))
                .on_press(Message::RetrySetup)
                .padding(12),
        ]
        .spacing(20)
        .align_x(Alignment::Center)
        .into()
    }

    fn view_restoring(&self) -> Element<Message> {
        column![
            text("⏳").size(48),
            text(format!("{} {}", labels::RESTORING_MSG, self.form.telegram_nick)).size(18),
        ]
        .spacing(20)
        .padding(60)
        .align_x(Alignment::Center)
        .into()
    }

    fn view_form(&self) -> Element<Message> {
        let mut content: Column<Message> = column![
            text(labels::TITLE).size(32),
            text(labels::SUBTITLE).size(16),
            ui::text_field::labeled_input(
                labels::TELEGRAM_NICK,
                labels::NICK_PLACEHOLDER,
                &self.form.telegram_nick,
                true,
                Message::NickChanged,
                Some(Message::NickCommitted),
            ),
        ]
        .spacing(18);

        if self.checking_user {
            content = content.push(text(labels::CHECKING_USER).size(14));
        }

        if self.user_exists_warning {
            let mut warning = column![
                text(labels::ALREADY_SUBMITTED_TITLE).size(16),
                text(labels::ALREADY_SUBMITTED_MSG).size(14),
            ]
            .spacing(8);

            if self.is_day2_active {
                warning = warning.push(
                    button(text(labels::SKIP_TO_DAY2_BTN))
                        .on_press(Message::SkipToDay2)
                        .padding(10),
                );
            }

            content = content.push(
                container(warning)
                    .style(container::bordered_box)
                    .padding(14)
                    .width(Length::Fill),
            );
        }

        for slot in ImageSlot::ALL {
            let slot_ref = SlotRef::Day1(slot);
            content = content.push(ui::uploader::image_slot(
                slot.label(),
                self.form.image(slot),
                self.encoding == Some(slot_ref),
                Message::PickImage(slot_ref),
                Message::ClearImage(slot_ref),
            ));
        }

        if !self.error_message.is_empty() {
            content = content.push(text(&self.error_message).size(14).style(text::danger));
        }

        let submit_label = if self.submitting {
            labels::SENDING
        } else if self.user_exists_warning {
            labels::RESUBMIT_BTN
        } else {
            labels::SUBMIT_BTN
        };
        let can_submit = !self.submitting && self.encoding.is_none();

        content = content.push(
            button(
                container(text(submit_label).size(18))
                    .width(Length::Fill)
                    .center_x(Length::Fill)
                    .padding(6),
            )
            .on_press_maybe(can_submit.then_some(Message::SubmitPressed))
            .width(Length::Fill)
            .padding(10),
        );

        content.into()
    }

    fn view_menu(&self) -> Element<Message> {
        let (icon, title) = if self.welcome_back {
            ("🔭", format!("Hi, {}!", self.form.telegram_nick))
        } else {
            ("✅", labels::SUCCESS_TITLE.to_string())
        };
        let subtitle = if self.welcome_back {
            labels::WELCOME_BACK_MSG
        } else {
            labels::SUCCESS_MSG
        };

        let mut content: Column<Message> = column![
            text(icon).size(48),
            text(title).size(28),
            text(subtitle).size(16),
        ]
        .spacing(16)
        .align_x(Alignment::Center);

        if !self.error_message.is_empty() {
            content = content.push(text(&self.error_message).size(14).style(text::danger));
        }

        if self.is_day2_active {
            let fetch_label = if self.fetching_asset {
                labels::FETCHING_ASSET
            } else {
                labels::DAY2_ACTIVE_BTN
            };
            content = content.push(
                button(
                    container(text(fetch_label).size(18))
                        .width(Length::Fill)
                        .center_x(Length::Fill)
                        .padding(6),
                )
                .on_press_maybe((!self.fetching_asset).then_some(Message::FetchAssetPressed))
                .width(Length::Fill)
                .padding(10),
            );
            content = content.push(
                button(text(labels::DAY2_FORM_BTN))
                    .on_press(Message::ProceedToDay2Form)
                    .padding(10),
            );
        } else {
            content = content.push(button(text(labels::DAY2_LOCKED_BTN)).padding(10));
            content = content.push(text(labels::DAY2_LOCKED_DESC).size(14));
        }

        content = content.push(button(text(labels::LOGOUT_BTN)).on_press(Message::Logout));
        content.into()
    }

    fn view_exchange(&self) -> Element<Message> {
        let Some(assets) = &self.received_assets else {
            // Unreachable by construction; render the menu as a safe fallback
            return self.view_menu();
        };

        let mut content: Column<Message> = column![
            text("🔭").size(48),
            text(labels::DAY2_EXCHANGE_TITLE).size(28),
            text(format!("{} {}", labels::DAY2_AUTHOR_PREFIX, self.received_author)).size(16),
            text(labels::DAY2_EXCHANGE_DESC).size(14),
        ]
        .spacing(14)
        .align_x(Alignment::Center);

        content = content.push(
            column![
                row![
                    self.asset_card(assets, AssetKind::Base),
                    self.asset_card(assets, AssetKind::Angle1),
                ]
                .spacing(12),
                row![
                    self.asset_card(assets, AssetKind::Angle2),
                    self.asset_card(assets, AssetKind::Angle3),
                ]
                .spacing(12),
            ]
            .spacing(12),
        );

        if !self.relay_notice.is_empty() {
            content = content.push(text(&self.relay_notice).size(14));
        }

        if self.bridge.is_some() {
            let relay_label = if self.sending_to_chat {
                "Sending..."
            } else {
                labels::SEND_TO_CHAT_BTN
            };
            content = content.push(
                button(text(relay_label))
                    .on_press_maybe((!self.sending_to_chat).then_some(Message::SendToChatPressed))
                    .padding(10),
            );
        }

        content = content.push(
            button(text(labels::PROCEED_DAY2_BTN))
                .on_press(Message::ProceedToDay2Form)
                .padding(10),
        );
        content = content.push(button(text(labels::LOGOUT_BTN)).on_press(Message::Logout));
        content.into()
    }

    fn asset_card<'a>(&'a self, assets: &'a AssetBundle, kind: AssetKind) -> Element<'a, Message> {
        let url = assets.url(kind);

        let preview: Element<'a, Message> = match self.previews.get(kind) {
            Some(handle) => iced::widget::image(handle.clone()).width(Length::Fill).into(),
            None => container(text("Loading preview...").size(13))
                .width(Length::Fill)
                .center_x(Length::Fill)
                .padding(30)
                .into(),
        };

        container(
            column![
                text(kind.label()).size(14),
                preview,
                row![
                    button(text(labels::OPEN_BTN).size(13))
                        .on_press(Message::OpenAsset(url.to_string())),
                    horizontal_space(),
                    button(text(labels::DOWNLOAD_BTN).size(13))
                        .on_press(Message::OpenAsset(host::to_download_url(url))),
                ]
                .spacing(8),
            ]
            .spacing(8),
        )
        .style(container::bordered_box)
        .padding(10)
        .width(Length::FillPortion(1))
        .into()
    }

    fn view_day2_form(&self) -> Element<Message> {
        let mut content: Column<Message> = column![
            text(labels::DAY2_FORM_BTN).size(28),
            text(format!("{}: {}", labels::TELEGRAM_NICK, self.form.telegram_nick)).size(14),
        ]
        .spacing(18);

        for slot in Day2Slot::ALL {
            let slot_ref = SlotRef::Day2(slot);
            content = content.push(ui::uploader::image_slot(
                slot.label(),
                self.day2.image(slot),
                self.encoding == Some(slot_ref),
                Message::PickImage(slot_ref),
                Message::ClearImage(slot_ref),
            ));
        }

        if !self.error_message.is_empty() {
            content = content.push(text(&self.error_message).size(14).style(text::danger));
        }

        let submit_label = if self.submitting {
            labels::SENDING
        } else {
            labels::DAY2_SUBMIT_BTN
        };
        let can_submit = !self.submitting && self.encoding.is_none();

        content = content.push(
            button(
                container(text(submit_label).size(18))
                    .width(Length::Fill)
                    .center_x(Length::Fill)
                    .padding(6),
            )
            .on_press_maybe(can_submit.then_some(Message::Day2SubmitPressed))
            .width(Length::Fill)
            .padding(10),
        );

        content.into()
    }

    fn view_day2_success(&self) -> Element<Message> {
        column![
            text("🎉").size(48),
            text(labels::DAY2_SUCCESS_TITLE).size(28),
            text(labels::DAY2_SUCCESS_MSG).size(16),
            button(text(labels::LOGOUT_BTN)).on_press(Message::Logout),
        ]
        .spacing(20)
        .align_x(Alignment::Center)
        .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Light
    }
}

/// Inline message naming the first missing required field
fn validation_message(missing: Option<&'static str>) -> String {
    match missing {
        Some(field) => format!("{} ({})", labels::VALIDATION_MSG, field),
        None => labels::VALIDATION_MSG.to_string(),
    }
}

fn main() -> iced::Result {
    iced::application(labels::TITLE, HomeworkApp::update, HomeworkApp::view)
        .theme(HomeworkApp::theme)
        .window_size(Size::new(540.0, 800.0))
        .centered()
        .run_with(HomeworkApp::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app(tmp: &tempfile::TempDir) -> HomeworkApp {
        HomeworkApp::with_parts(
            Some(ScriptConfig {
                script_url: "https://script.example/macros/s/abc/exec".to_string(),
            }),
            SessionStore::at(tmp.path().join("session.json")),
            None,
        )
    }

    fn photo_stub(name: &str) -> UploadedImage {
        UploadedImage {
            filename: name.to_string(),
            data_url: format!("data:image/png;base64,{}", name),
            preview: Handle::from_bytes(vec![0u8; 4]),
        }
    }

    fn fill_day1(app: &mut HomeworkApp) {
        app.form.telegram_nick = "@alice".to_string();
        for slot in ImageSlot::ALL {
            app.form.set_image(slot, Some(photo_stub(slot.label())));
        }
    }

    fn success_response(day2: bool) -> ApiResponse {
        ApiResponse {
            status: ResponseStatus::Success,
            message: None,
            is_day2_active: Some(day2),
            assets: None,
            author_nick: None,
        }
    }

    fn bundle_response() -> ApiResponse {
        ApiResponse {
            status: ResponseStatus::Success,
            message: None,
            is_day2_active: None,
            assets: Some(AssetBundle {
                base: "https://drive.example/a?export=view".to_string(),
                angle1: "https://drive.example/b?export=view".to_string(),
                angle2: "https://drive.example/c?export=view".to_string(),
                angle3: "https://drive.example/d?export=view".to_string(),
            }),
            author_nick: Some("@bob".to_string()),
        }
    }

    #[test]
    fn test_missing_config_blocks_on_setup_screen() {
        let tmp = tempfile::tempdir().unwrap();
        let app =
            HomeworkApp::with_parts(None, SessionStore::at(tmp.path().join("session.json")), None);
        assert_eq!(app.screen, Screen::Setup);
        assert!(app.client.is_none());
    }

    #[test]
    fn test_incomplete_day1_submit_makes_no_request() {
        let tmp = tempfile::tempdir().unwrap();
        let mut app = test_app(&tmp);
        fill_day1(&mut app);
        app.form.set_image(ImageSlot::Angle2, None);

        let _ = app.update(Message::SubmitPressed);

        // No in-flight submit, inline validation instead
        assert!(!app.submitting);
        assert!(app.error_message.contains(labels::VALIDATION_MSG));
        assert!(app.error_message.contains(labels::ANGLE_2));
    }

    #[test]
    fn test_complete_day1_submit_goes_pending() {
        let tmp = tempfile::tempdir().unwrap();
        let mut app = test_app(&tmp);
        fill_day1(&mut app);

        let _ = app.update(Message::SubmitPressed);
        assert!(app.submitting);
        assert!(app.error_message.is_empty());

        // The control is disabled while pending: a second press is inert
        let _ = app.update(Message::SubmitPressed);
        assert!(app.submitting);
    }

    #[test]
    fn test_successful_submit_persists_nick_and_carries_day2_flag() {
        let tmp = tempfile::tempdir().unwrap();
        let mut app = test_app(&tmp);
        fill_day1(&mut app);

        let _ = app.update(Message::SubmitPressed);
        let _ = app.update(Message::SubmitFinished(Ok(success_response(true))));

        assert_eq!(app.screen, Screen::Menu);
        assert!(app.is_day2_active);
        assert!(!app.welcome_back);
        assert_eq!(app.session.load().as_deref(), Some("@alice"));
    }

    #[test]
    fn test_failed_submit_stays_on_form_with_message() {
        let tmp = tempfile::tempdir().unwrap();
        let mut app = test_app(&tmp);
        fill_day1(&mut app);

        let _ = app.update(Message::SubmitPressed);
        let _ = app.update(Message::SubmitFinished(Err("HTTP error: 500".to_string())));

        assert_eq!(app.screen, Screen::Form);
        assert!(!app.submitting);
        assert_eq!(app.error_message, "HTTP error: 500");
        assert!(app.session.load().is_none());
    }

    #[test]
    fn test_confirmed_restore_shows_menu_without_reupload() {
        let tmp = tempfile::tempdir().unwrap();
        let mut app = test_app(&tmp);
        app.form.telegram_nick = "@alice".to_string();
        app.screen = Screen::Restoring;
        app.restore_pending = true;

        let _ = app.update(Message::SessionVerified(UserCheck {
            exists: true,
            is_day2_active: true,
        }));

        assert_eq!(app.screen, Screen::Menu);
        assert!(app.welcome_back);
        assert!(app.is_day2_active);
    }

    #[test]
    fn test_restore_timeout_falls_back_to_form_at_most_once() {
        let tmp = tempfile::tempdir().unwrap();
        let mut app = test_app(&tmp);
        app.form.telegram_nick = "@alice".to_string();
        app.screen = Screen::Restoring;
        app.restore_pending = true;

        let _ = app.update(Message::RestoreTimedOut);
        assert_eq!(app.screen, Screen::Form);
        assert!(app.restore_fallback_done);

        let _ = app.update(Message::RestoreTimedOut);
        assert_eq!(app.screen, Screen::Form);

        // The underlying call was not cancelled: a late confirmation
        // still lands as long as the user has not intervened
        let _ = app.update(Message::SessionVerified(UserCheck {
            exists: true,
            is_day2_active: false,
        }));
        assert_eq!(app.screen, Screen::Menu);
    }

    #[test]
    fn test_late_restore_result_is_dropped_after_user_edits() {
        let tmp = tempfile::tempdir().unwrap();
        let mut app = test_app(&tmp);
        app.form.telegram_nick = "@alice".to_string();
        app.screen = Screen::Restoring;
        app.restore_pending = true;

        let _ = app.update(Message::RestoreTimedOut);
        let _ = app.update(Message::NickChanged("@someone-else".to_string()));
        let _ = app.update(Message::SessionVerified(UserCheck {
            exists: true,
            is_day2_active: false,
        }));

        assert_eq!(app.screen, Screen::Form);
        assert!(!app.welcome_back);
    }

    #[test]
    fn test_unknown_saved_nick_lands_on_form() {
        let tmp = tempfile::tempdir().unwrap();
        let mut app = test_app(&tmp);
        app.form.telegram_nick = "@alice".to_string();
        app.screen = Screen::Restoring;
        app.restore_pending = true;

        let _ = app.update(Message::SessionVerified(UserCheck::default()));
        assert_eq!(app.screen, Screen::Form);
        assert_eq!(app.form.telegram_nick, "@alice");
    }

    #[test]
    fn test_user_check_raises_warning_and_unlocks_day2() {
        let tmp = tempfile::tempdir().unwrap();
        let mut app = test_app(&tmp);
        app.checking_user = true;

        let _ = app.update(Message::UserChecked(UserCheck {
            exists: true,
            is_day2_active: true,
        }));
        assert!(app.user_exists_warning);
        assert!(app.is_day2_active);
        assert!(!app.checking_user);

        // Editing the nick clears the warning
        let _ = app.update(Message::NickChanged("@other".to_string()));
        assert!(!app.user_exists_warning);
    }

    #[test]
    fn test_skip_to_day2_needs_the_unlock() {
        let tmp = tempfile::tempdir().unwrap();
        let mut app = test_app(&tmp);
        app.form.telegram_nick = "@alice".to_string();

        let _ = app.update(Message::SkipToDay2);
        assert_eq!(app.screen, Screen::Form);
        assert!(app.session.load().is_none());

        app.is_day2_active = true;
        let _ = app.update(Message::SkipToDay2);
        assert_eq!(app.screen, Screen::Menu);
        assert!(app.welcome_back);
        assert_eq!(app.session.load().as_deref(), Some("@alice"));
    }

    #[test]
    fn test_fetch_asset_requires_day2_unlock() {
        let tmp = tempfile::tempdir().unwrap();
        let mut app = test_app(&tmp);
        app.screen = Screen::Menu;

        let _ = app.update(Message::FetchAssetPressed);
        assert!(!app.fetching_asset);

        app.is_day2_active = true;
        let _ = app.update(Message::FetchAssetPressed);
        assert!(app.fetching_asset);
    }

    #[test]
    fn test_received_bundle_moves_to_exchange() {
        let tmp = tempfile::tempdir().unwrap();
        let mut app = test_app(&tmp);
        app.screen = Screen::Menu;
        app.is_day2_active = true;
        app.fetching_asset = true;

        let _ = app.update(Message::AssetFetched(Ok(bundle_response())));

        assert_eq!(app.screen, Screen::Exchange);
        assert!(!app.fetching_asset);
        assert_eq!(app.received_author, "@bob");
        assert!(app.received_assets.is_some());
    }

    #[test]
    fn test_declared_fetch_error_surfaces_message_and_stays() {
        let tmp = tempfile::tempdir().unwrap();
        let mut app = test_app(&tmp);
        app.screen = Screen::Menu;
        app.is_day2_active = true;
        app.fetching_asset = true;

        let response = ApiResponse {
            status: ResponseStatus::Error,
            message: Some("no bundles left".to_string()),
            is_day2_active: None,
            assets: None,
            author_nick: None,
        };
        let _ = app.update(Message::AssetFetched(Ok(response)));

        assert_eq!(app.screen, Screen::Menu);
        assert_eq!(app.error_message, "no bundles left");
    }

    #[test]
    fn test_anonymous_author_fallback() {
        let tmp = tempfile::tempdir().unwrap();
        let mut app = test_app(&tmp);
        app.screen = Screen::Menu;
        app.is_day2_active = true;

        let mut response = bundle_response();
        response.author_nick = None;
        let _ = app.update(Message::AssetFetched(Ok(response)));

        assert_eq!(app.received_author, labels::ANONYMOUS_AUTHOR);
    }

    #[test]
    fn test_relay_needs_the_host_bridge() {
        let tmp = tempfile::tempdir().unwrap();
        let mut app = test_app(&tmp);
        app.screen = Screen::Exchange;
        app.received_assets = bundle_response().assets;

        // No bridge: the press is inert
        let _ = app.update(Message::SendToChatPressed);
        assert!(!app.sending_to_chat);

        app.bridge = Some(HostBridge { chat_id: 42 });
        app.form.telegram_nick = "@alice".to_string();
        let _ = app.update(Message::SendToChatPressed);
        assert!(app.sending_to_chat);

        let _ = app.update(Message::RelayFinished(Err(
            "The bot has never seen this chat. Open the bot in Telegram and press Start first."
                .to_string(),
        )));
        assert!(!app.sending_to_chat);
        assert!(app.relay_notice.contains("press Start"));
    }

    #[test]
    fn test_incomplete_day2_submit_makes_no_request() {
        let tmp = tempfile::tempdir().unwrap();
        let mut app = test_app(&tmp);
        app.form.telegram_nick = "@alice".to_string();
        app.screen = Screen::Day2Form;
        app.day2.received_reference = Some(photo_stub("r"));

        let _ = app.update(Message::Day2SubmitPressed);

        assert!(!app.submitting);
        assert!(app.error_message.contains(labels::VALIDATION_MSG));
        assert!(app.error_message.contains(labels::RESULT_1));
    }

    #[test]
    fn test_complete_day2_submit_reaches_success_screen() {
        let tmp = tempfile::tempdir().unwrap();
        let mut app = test_app(&tmp);
        app.form.telegram_nick = "@alice".to_string();
        app.screen = Screen::Day2Form;
        app.day2.received_reference = Some(photo_stub("r"));
        app.day2.result1 = Some(photo_stub("x"));
        app.day2.result2 = Some(photo_stub("y"));

        let _ = app.update(Message::Day2SubmitPressed);
        assert!(app.submitting);

        let _ = app.update(Message::Day2SubmitFinished(Ok(success_response(true))));
        assert_eq!(app.screen, Screen::Day2Success);
    }

    #[test]
    fn test_logout_clears_session_and_resets_everything() {
        let tmp = tempfile::tempdir().unwrap();
        let mut app = test_app(&tmp);
        fill_day1(&mut app);
        app.session.save("@alice").unwrap();
        app.is_day2_active = true;
        app.welcome_back = true;
        app.user_exists_warning = true;
        app.received_assets = bundle_response().assets;
        app.received_author = "@bob".to_string();
        app.error_message = "leftover".to_string();
        app.screen = Screen::Exchange;

        let _ = app.update(Message::Logout);

        assert_eq!(app.screen, Screen::Form);
        assert!(app.session.load().is_none());
        assert!(app.form.telegram_nick.is_empty());
        assert!(!app.form.is_complete());
        assert!(app.day2.first_missing().is_some());
        assert!(!app.is_day2_active);
        assert!(!app.welcome_back);
        assert!(!app.user_exists_warning);
        assert!(app.received_assets.is_none());
        assert!(app.received_author.is_empty());
        assert!(app.error_message.is_empty());
    }

    #[test]
    fn test_image_loaded_fills_the_right_slot() {
        let tmp = tempfile::tempdir().unwrap();
        let mut app = test_app(&tmp);
        let slot = SlotRef::Day1(ImageSlot::Angle1);
        app.encoding = Some(slot);

        let _ = app.update(Message::ImageLoaded(slot, Ok(photo_stub("a1.png"))));
        assert!(app.encoding.is_none());
        assert!(app.form.angle1.is_some());

        let slot2 = SlotRef::Day2(Day2Slot::Result2);
        let _ = app.update(Message::ImageLoaded(slot2, Err("bad file".to_string())));
        assert!(app.day2.result2.is_none());
        assert_eq!(app.error_message, "bad file");
    }
}
