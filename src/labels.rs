/// User-facing strings in one place
///
/// Everything an operator might want to reword between marathons lives
/// here, so no screen text hides inside view code.

pub const TITLE: &str = "AI Direction Marathon";
pub const SUBTITLE: &str = "Two-day homework exchange";

pub const TELEGRAM_NICK: &str = "Your Telegram nick";
pub const NICK_PLACEHOLDER: &str = "@username";

pub const BASE_REF: &str = "Base reference";
pub const ANGLE_1: &str = "Angle variant 1";
pub const ANGLE_2: &str = "Angle variant 2";
pub const ANGLE_3: &str = "Angle variant 3";

pub const RECEIVED_REF: &str = "Received reference";
pub const RESULT_1: &str = "Result shot 1";
pub const RESULT_2: &str = "Result shot 2";

pub const SUBMIT_BTN: &str = "Send homework";
pub const RESUBMIT_BTN: &str = "Update homework";
pub const SENDING: &str = "Uploading your work...";
pub const VALIDATION_MSG: &str = "Please fill in all required fields";

pub const SUCCESS_TITLE: &str = "Homework received!";
pub const SUCCESS_MSG: &str =
    "Your images are saved. Come back when stage 2 opens to pick up a peer's reference.";
pub const WELCOME_BACK_MSG: &str =
    "Good to see you again. You can move straight on to stage 2.";

pub const CHECKING_USER: &str = "Checking the participant list...";
pub const ALREADY_SUBMITTED_TITLE: &str = "You already handed in work";
pub const ALREADY_SUBMITTED_MSG: &str =
    "We found a submission under this nick. Sending the form again replaces the old files.";
pub const SKIP_TO_DAY2_BTN: &str = "Go to stage 2 (skip re-upload)";

pub const DAY2_ACTIVE_BTN: &str = "Get my exchange reference";
pub const DAY2_LOCKED_BTN: &str = "Stage 2 is locked";
pub const DAY2_LOCKED_DESC: &str =
    "Stage 2 opens for everyone once day-1 submissions close. Check back later.";
pub const DAY2_FORM_BTN: &str = "Submit stage 2 work";
pub const DAY2_EXCHANGE_TITLE: &str = "Your exchange bundle";
pub const DAY2_EXCHANGE_DESC: &str =
    "Save these four images and use them as the reference for your stage 2 work.";
pub const DAY2_AUTHOR_PREFIX: &str = "Bundle author:";
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";
pub const PROCEED_DAY2_BTN: &str = "Proceed to stage 2 form";
pub const DAY2_SUBMIT_BTN: &str = "Send stage 2 work";
pub const DAY2_SUCCESS_TITLE: &str = "Stage 2 complete!";
pub const DAY2_SUCCESS_MSG: &str =
    "Your result shots are in. Thanks for finishing the marathon.";

pub const SEND_TO_CHAT_BTN: &str = "Send bundle to my chat";
pub const SENT_TO_CHAT_MSG: &str = "Bundle sent to your chat.";

pub const FETCHING_ASSET: &str = "Fetching a bundle...";
pub const FETCH_FAILED_FALLBACK: &str = "Could not fetch a bundle. Try again later.";

pub const OPEN_BTN: &str = "Open";
pub const DOWNLOAD_BTN: &str = "Download";
pub const LOGOUT_BTN: &str = "Log out";
pub const RESTORING_MSG: &str = "Restoring your session...";

pub const SETUP_TITLE: &str = "Setup incomplete!";
pub const SETUP_MSG: &str =
    "The app does not know where to send data because the script endpoint is not configured.";
pub const SETUP_RETRY_BTN: &str = "Check again";
