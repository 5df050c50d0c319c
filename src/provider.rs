use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use crate::match_fetch::{self, ApiConfig};
use crate::state::{Delta, ProviderCommand};

/// Run the fetch side on its own thread. Commands arrive from the UI loop;
/// each one is served by a short-lived job thread so the two list reads can
/// overlap. The provider exits when the command channel closes.
pub fn spawn_provider(tx: Sender<Delta>, cmd_rx: Receiver<ProviderCommand>) {
    thread::spawn(move || {
        let config = Arc::new(ApiConfig::from_env());

        for cmd in cmd_rx {
            match cmd {
                ProviderCommand::FetchAllMatches { epoch } => {
                    let tx = tx.clone();
                    let config = config.clone();
                    thread::spawn(move || match match_fetch::fetch_all_matches(&config) {
                        Ok(matches) => {
                            let _ = tx.send(Delta::AllMatchesLoaded { epoch, matches });
                        }
                        Err(err) => {
                            let _ = tx.send(Delta::Log(format!(
                                "[WARN] Match list fetch error: {err:#}"
                            )));
                            let _ = tx.send(Delta::AllMatchesFailed { epoch });
                        }
                    });
                }
                ProviderCommand::FetchCurrentMatches { epoch } => {
                    let tx = tx.clone();
                    let config = config.clone();
                    thread::spawn(move || match match_fetch::fetch_current_matches(&config) {
                        Ok(matches) => {
                            let _ = tx.send(Delta::CurrentMatchesLoaded { epoch, matches });
                        }
                        Err(err) => {
                            let _ = tx.send(Delta::Log(format!(
                                "[WARN] Current matches fetch error: {err:#}"
                            )));
                            let _ = tx.send(Delta::CurrentMatchesFailed { epoch });
                        }
                    });
                }
                ProviderCommand::FetchMatchDetail { epoch, match_id } => {
                    let tx = tx.clone();
                    let config = config.clone();
                    thread::spawn(move || {
                        match match_fetch::fetch_match_detail(&config, &match_id) {
                            Ok(detail) => {
                                let _ = tx.send(Delta::MatchDetailLoaded { epoch, detail });
                            }
                            Err(err) => {
                                let _ = tx.send(Delta::Log(format!(
                                    "[WARN] Match details fetch error: {err:#}"
                                )));
                                let _ = tx.send(Delta::MatchDetailFailed { epoch });
                            }
                        }
                    });
                }
            }
        }
    });
}
