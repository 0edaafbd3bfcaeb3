/// Screens the client can navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Route {
    #[strum(serialize = "/")]
    Landing,
    #[strum(serialize = "/login")]
    Login,
    #[strum(serialize = "/register")]
    Register,
    #[strum(serialize = "/auth/callback")]
    OAuthCallback,
    #[strum(serialize = "/dashboard")]
    Dashboard,
}
