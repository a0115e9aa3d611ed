use std::{
    collections::BTreeMap,
    env, fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::Args;
use directories::BaseDirs;
use rpassword::prompt_password;
use shared::{
    client::DirectoryClient,
    config::ClientConfig,
    guard::{self, Access, GuardOutcome},
    session::{KeyValueStore, SessionContext, SessionError},
    validation::{LoginField, LoginForm},
    workflow::{self, LoginOutcome},
};
use tracing::debug;

/// Overrides the session file location.
pub const SESSION_FILE_ENV: &str = "DASHSYNC_SESSION_FILE";

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email address; prompted for when omitted
    #[arg(long, short)]
    pub email: Option<String>,

    /// Account password; prompted for when omitted
    #[arg(long, short)]
    pub password: Option<String>,
}

/// Session keys persisted as a flat JSON object on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<BTreeMap<String, String>, SessionError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|err| SessionError::Unavailable(format!("{}: {err}", self.path.display()))),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(SessionError::Unavailable(format!(
                "{}: {err}",
                self.path.display()
            ))),
        }
    }

    fn write(&self, key: &str, entries: &BTreeMap<String, String>) -> Result<(), SessionError> {
        let write_error = |reason: String| SessionError::Write {
            key: key.to_string(),
            reason,
        };

        if entries.is_empty() {
            return match fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
                Err(err) => Err(write_error(err.to_string())),
            };
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| write_error(err.to_string()))?;
        }
        let contents = serde_json::to_string_pretty(entries)
            .map_err(|err| SessionError::Encode(err.to_string()))?;
        fs::write(&self.path, contents).map_err(|err| write_error(err.to_string()))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))
                .map_err(|err| write_error(err.to_string()))?;
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.read() {
            Ok(mut entries) => entries.remove(key),
            Err(err) => {
                debug!(error = %err, "session file unreadable");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let mut entries = self.read()?;
        entries.insert(key.to_string(), value.to_string());
        self.write(key, &entries)
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        let mut entries = self.read()?;
        if entries.remove(key).is_none() && !self.path.exists() {
            return Ok(());
        }
        self.write(key, &entries)
    }
}

pub fn session_path() -> PathBuf {
    if let Some(path) = env::var_os(SESSION_FILE_ENV).filter(|path| !path.is_empty()) {
        return PathBuf::from(path);
    }
    BaseDirs::new()
        .map(|dirs| dirs.config_dir().join("dashsync").join("session.json"))
        .unwrap_or_else(|| PathBuf::from("./session.json"))
}

/// The terminal counterpart of the web app's store: configuration plus the
/// session loaded from disk.
#[derive(Debug)]
pub struct Terminal {
    pub config: ClientConfig,
    pub session: SessionContext<FileStore>,
}

impl Terminal {
    pub fn open(config: ClientConfig) -> Self {
        Self::with_store(config, FileStore::new(session_path()))
    }

    pub fn with_store(config: ClientConfig, store: FileStore) -> Self {
        Self {
            config,
            session: SessionContext::init(store),
        }
    }

    /// A client carrying the current token, if any.
    pub fn client(&self) -> DirectoryClient {
        DirectoryClient::new(self.config.clone())
            .with_token(self.session.token().map(str::to_string))
    }

    /// Fails unless `access` lets the current visitor through.
    pub fn require(&self, access: Access) -> Result<()> {
        match guard::resolve(access, self.session.is_authenticated()) {
            GuardOutcome::Render => Ok(()),
            GuardOutcome::RedirectToLogin => {
                bail!("not signed in; run `dashsync login --email <EMAIL>` first")
            }
            GuardOutcome::RedirectToDirectory => {
                bail!("already signed in; run `dashsync logout` first")
            }
        }
    }

    pub async fn login(&mut self, args: LoginArgs) -> Result<()> {
        self.require(Access::GuestOnly)?;

        let email = match args.email {
            Some(email) => email,
            None => prompt("Email: ")?,
        };
        let password = match args.password {
            Some(password) => password,
            None => prompt_password("Password: ").context("failed to read password")?,
        };
        let form = LoginForm::new(email, password);

        let client = self.client();
        match workflow::sign_in(&client, &mut self.session, &form).await {
            LoginOutcome::Authenticated { notice, .. } => {
                println!("{}", notice.message);
                println!(
                    "Session saved to {}",
                    self.session.store().backend().path().display()
                );
                Ok(())
            }
            LoginOutcome::Rejected(notice) => bail!("{}", notice.message),
            LoginOutcome::Invalid(errors) => {
                let messages: Vec<&str> = [LoginField::Email, LoginField::Password]
                    .into_iter()
                    .filter_map(|field| errors.get(field))
                    .collect();
                bail!("{}", messages.join(" "))
            }
        }
    }

    pub fn logout(&mut self) -> Result<()> {
        let was_signed_in = self.session.is_authenticated();
        self.session
            .teardown()
            .context("failed to clear the stored session")?;
        if was_signed_in {
            println!("Logged out.");
        } else {
            println!("No active session.");
        }
        Ok(())
    }

    pub fn whoami(&self) {
        match (self.session.is_authenticated(), self.session.marker()) {
            (true, Some(marker)) => println!(
                "Signed in as {} since {}",
                marker.email,
                marker.signed_in_at.format("%Y-%m-%d %H:%M:%S UTC")
            ),
            (true, None) => println!("Signed in"),
            (false, _) => println!("Not signed in"),
        }
    }
}

fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush().ok();
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let trimmed = input.trim().to_string();
    if trimmed.is_empty() {
        bail!("input must not be empty");
    }
    Ok(trimmed)
}
