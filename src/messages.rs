//! User-facing response messages
//! Mission: keep wire-level message strings in one place

pub const ADMIN_LOGIN_SUCC: &str = "Admin logged in successfully";
pub const ADMIN_NOT_FOUND: &str = "Admin does not exist";
pub const ADMIN_USER_ALREADY_LOADED: &str = "Initial user already loaded.";
pub const ADMIN_USER_LOADED_SUCC: &str = "Initial user loaded successfully.";

pub const FORGOT_PASS_SUCC: &str =
    "Reset Password link will be sent to your email. Please follow that link to reset your password.";
pub const RESET_TOKEN_INVALID: &str = "Your link has been expired";
pub const RESET_PASS_SUCC: &str = "Password reset successfully.";

pub const MID_USER_ACC_DELETED: &str =
    "Your Account has been deleted by an admin, Please visit Contact Us to contact an admin.";
pub const MID_USER_ACC_INACTIVE: &str = "Your Account has been deactivated by an Admin.";

pub const USER_DOES_NOT_FOUND: &str =
    "No account found with this email. Please check your email";
pub const ACCOUNT_DISABLED: &str = "Your account has been disabled by an admin.";
pub const EMAIL_ALREADY_EXIST: &str = "Email is already exist";
pub const INVALID_PASSWORD: &str = "Invalid email or password";
pub const AUTH_REQUIRED: &str = "Authentication required";
pub const TOKEN_EXPIRED: &str = "Token has expired";
pub const TOKEN_INVALID: &str = "Invalid token";

pub const USER_SIGN_UP_SUCC: &str = "User SignUp successfully";
pub const USER_SIGN_IN_SUCC: &str = "User SignIn successfully";
pub const USER_GET_SUCC: &str = "User details fetch successfully";
pub const USER_UPDATED_SUCC: &str = "User updated successfully";

pub const PROJECT_ADDED_SUCC: &str = "Project added successfully";
pub const PROJECT_UPDATED_SUCC: &str = "Project updated successfully";
pub const PROJECT_VIEW_SUCC: &str = "Project details fetch successfully";
pub const PROJECT_DELETED_SUCC: &str = "Project deleted successfully";
pub const PROJECT_LIST_SUCC: &str = "Project listed successfully";
pub const PROJECT_NOT_FOUND: &str = "Project is not found";
pub const PROJECT_IS_NOT_LINKED: &str = "This Project is not linked to your user account.";

pub const TASK_ADDED_SUCC: &str = "Task added successfully.";
pub const TASK_UPDATED_SUCC: &str = "Task updated successfully.";
pub const TASK_LIST_SUCC: &str = "Task list fetch successfully.";
pub const TASK_UPDATE_DETAILS_SUCC: &str = "Task details updated successfully.";
pub const TASK_DELETE_SUCC: &str = "Task deleted successfully.";
pub const TASK_NOT_FOUND: &str = "Task is not found";
