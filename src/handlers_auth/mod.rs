mod login;
mod refresh;
mod register;

pub(crate) use self::login::login;
pub(crate) use self::refresh::refresh;
pub(crate) use self::register::register;
