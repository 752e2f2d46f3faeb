//! Interactive console session
//!
//! Drives the auth and home menus over any line-oriented input/output pair,
//! which keeps the whole flow testable against in-memory buffers. End of
//! input anywhere is treated as a request to leave.

use std::io::{BufRead, Write};

use anyhow::Result;
use mingle_core::{limits, SocialNetwork, UserId};

use crate::prompt;

/// What the caller of a menu flow should do next
#[derive(Debug, PartialEq)]
enum Flow {
    Continue,
    Quit,
}

pub struct Session<'a, R, W> {
    network: &'a mut SocialNetwork,
    input: R,
    output: W,
    current: Option<UserId>,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(network: &'a mut SocialNetwork, input: R, output: W) -> Self {
        Self {
            network,
            input,
            output,
            current: None,
        }
    }

    /// Run the auth menu until the user exits or input ends
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "\n-- MINGLE --\n")?;
            writeln!(self.output, "1. Sign Up")?;
            writeln!(self.output, "2. Log In")?;
            writeln!(self.output, "3. Exit")?;
            writeln!(self.output)?;
            let Some(choice) = prompt::read_choice(&mut self.input, &mut self.output)? else {
                break;
            };
            match choice {
                1 => {
                    if self.sign_up()? == Flow::Quit {
                        break;
                    }
                }
                2 => {
                    if self.log_in()? == Flow::Quit {
                        break;
                    }
                }
                3 => break,
                _ => continue,
            }
        }
        tracing::debug!("session over");
        Ok(())
    }

    /// One sign-up attempt; a rejected field returns to the auth menu
    fn sign_up(&mut self) -> Result<Flow> {
        writeln!(self.output, "\n-- SIGN UP --\n")?;
        write!(self.output, "Username: ")?;
        self.output.flush()?;
        let Some(username) = prompt::read_line(&mut self.input)? else {
            return Ok(Flow::Quit);
        };
        if let Err(err) = limits::validate_username(&username) {
            writeln!(self.output, "{err}")?;
            return Ok(Flow::Continue);
        }
        if self.network.username_taken(&username) {
            writeln!(self.output, "Username is already taken.")?;
            return Ok(Flow::Continue);
        }

        write!(self.output, "Password: ")?;
        self.output.flush()?;
        let Some(password) = prompt::read_line(&mut self.input)? else {
            return Ok(Flow::Quit);
        };
        if let Err(err) = limits::validate_password(&password) {
            writeln!(self.output, "{err}")?;
            return Ok(Flow::Continue);
        }

        let user = self.network.create_user(&username, &password)?;
        let id = user.id;
        let name = user.username.clone();
        tracing::info!("signed up {} as user {}", name, id);
        writeln!(self.output, "\nWelcome aboard, {name}!")?;
        self.current = Some(id);
        self.home()
    }

    /// One log-in attempt; wrong credentials return to the auth menu
    fn log_in(&mut self) -> Result<Flow> {
        writeln!(self.output, "\n-- LOG IN --\n")?;
        write!(self.output, "Username: ")?;
        self.output.flush()?;
        let Some(username) = prompt::read_line(&mut self.input)? else {
            return Ok(Flow::Quit);
        };
        write!(self.output, "Password: ")?;
        self.output.flush()?;
        let Some(password) = prompt::read_line(&mut self.input)? else {
            return Ok(Flow::Quit);
        };

        match self.network.authenticate(&username, &password) {
            Some(user) => {
                let id = user.id;
                let name = user.username.clone();
                tracing::info!("logged in {} as user {}", name, id);
                writeln!(self.output, "\nWelcome back, {name}!")?;
                self.current = Some(id);
                self.home()
            }
            None => {
                writeln!(self.output, "Incorrect account details.")?;
                Ok(Flow::Continue)
            }
        }
    }

    /// The logged-in menu; returns on log out
    fn home(&mut self) -> Result<Flow> {
        let Some(current) = self.current else {
            return Ok(Flow::Continue);
        };
        loop {
            let name = self.username_of(current);
            writeln!(self.output, "\nWELCOME, {name}!\n")?;
            writeln!(self.output, "1. Go to Feed")?;
            writeln!(self.output, "2. See Friends")?;
            writeln!(self.output, "3. See All Users")?;
            writeln!(self.output, "4. Log Out")?;
            writeln!(self.output)?;
            let Some(choice) = prompt::read_choice(&mut self.input, &mut self.output)? else {
                return Ok(Flow::Quit);
            };
            match choice {
                1 => {
                    self.show_feed(current)?;
                    if self.offer_post(current)? == Flow::Quit {
                        return Ok(Flow::Quit);
                    }
                }
                2 => self.show_friends(current)?,
                3 => {
                    self.show_all_users()?;
                    if self.offer_friend(current)? == Flow::Quit {
                        return Ok(Flow::Quit);
                    }
                }
                4 => {
                    self.current = None;
                    return Ok(Flow::Continue);
                }
                _ => continue,
            }
        }
    }

    fn show_feed(&mut self, current: UserId) -> Result<()> {
        writeln!(self.output, "\n-- FEED --\n")?;
        for entry in self.network.generate_feed(current) {
            writeln!(self.output, "{}", entry.author)?;
            writeln!(self.output, "{}", entry.posted_at)?;
            writeln!(self.output, "{}", entry.content)?;
            writeln!(self.output)?;
        }
        Ok(())
    }

    /// Offer to write a post; re-prompts until the content passes
    fn offer_post(&mut self, current: UserId) -> Result<Flow> {
        write!(self.output, "Share your thoughts? ")?;
        self.output.flush()?;
        let Some(wants) = prompt::read_yes_no(&mut self.input, &mut self.output)? else {
            return Ok(Flow::Quit);
        };
        if !wants {
            return Ok(Flow::Continue);
        }

        writeln!(self.output, "What's on your mind?")?;
        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;
            let Some(content) = prompt::read_line(&mut self.input)? else {
                return Ok(Flow::Quit);
            };
            match self.network.create_post(current, &content) {
                Ok(()) => return Ok(Flow::Continue),
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
    }

    fn show_friends(&mut self, current: UserId) -> Result<()> {
        let name = self.username_of(current);
        writeln!(self.output, "\n-- {name}'s Friends --\n")?;
        for (index, friend) in self.network.friends_of(current).iter().enumerate() {
            let label = self.username_of(*friend);
            writeln!(self.output, "{}. {}", index + 1, label)?;
        }
        writeln!(self.output)?;
        Ok(())
    }

    fn show_all_users(&mut self) -> Result<()> {
        writeln!(self.output, "\n-- All Users --\n")?;
        let mut users: Vec<_> = self
            .network
            .users()
            .map(|user| (user.id, user.username.clone()))
            .collect();
        users.sort_by_key(|(id, _)| *id);
        for (index, (_, username)) in users.iter().enumerate() {
            writeln!(self.output, "{}. {}", index + 1, username)?;
        }
        writeln!(self.output)?;
        Ok(())
    }

    /// Offer to add a friend by username; re-prompts until one resolves
    fn offer_friend(&mut self, current: UserId) -> Result<Flow> {
        write!(self.output, "Add a friend? ")?;
        self.output.flush()?;
        let Some(wants) = prompt::read_yes_no(&mut self.input, &mut self.output)? else {
            return Ok(Flow::Quit);
        };
        if !wants {
            return Ok(Flow::Continue);
        }

        let friend = loop {
            write!(self.output, "Enter the name of the user you want to add: ")?;
            self.output.flush()?;
            let Some(username) = prompt::read_line(&mut self.input)? else {
                return Ok(Flow::Quit);
            };
            match self.network.find_by_username(&username) {
                Some(user) if user.id == current => {
                    writeln!(self.output, "You can't add yourself.")?;
                }
                Some(user) => break user.id,
                None => writeln!(self.output, "Username not found.")?,
            }
        };

        let name = self.username_of(friend);
        if self.network.are_friends(current, friend)? {
            writeln!(self.output, "You are already friends with {name}.")?;
        } else {
            self.network.add_friendship(current, friend)?;
            writeln!(self.output, "You are now friends with {name}!")?;
        }
        Ok(Flow::Continue)
    }

    fn username_of(&self, id: UserId) -> String {
        self.network
            .user(id)
            .map(|user| user.username.clone())
            .unwrap_or_else(|| format!("user #{id}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_session(network: &mut SocialNetwork, script: &str) -> String {
        let mut out = Vec::new();
        Session::new(network, Cursor::new(script.as_bytes()), &mut out)
            .run()
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_sign_up_then_log_out_then_exit() {
        let mut network = SocialNetwork::new();
        let out = run_session(&mut network, "1\nalice\npassword1\n4\n3\n");

        assert!(out.contains("Welcome aboard, alice!"));
        assert!(network.username_taken("alice"));
        assert_eq!(network.user_count(), 1);
    }

    #[test]
    fn test_sign_up_rejects_taken_username() {
        let mut network = SocialNetwork::new();
        network.create_user("alice", "password1").unwrap();

        let out = run_session(&mut network, "1\nalice\n3\n");
        assert!(out.contains("Username is already taken."));
        assert_eq!(network.user_count(), 1);
    }

    #[test]
    fn test_sign_up_rejects_short_username() {
        let mut network = SocialNetwork::new();
        let out = run_session(&mut network, "1\nab\n3\n");

        assert!(out.contains("Username must be 3-15 characters"));
        assert_eq!(network.user_count(), 0);
    }

    #[test]
    fn test_log_in_with_wrong_password() {
        let mut network = SocialNetwork::new();
        network.create_user("alice", "password1").unwrap();

        let out = run_session(&mut network, "2\nalice\nhunter22\n3\n");
        assert!(out.contains("Incorrect account details."));
    }

    #[test]
    fn test_post_shows_up_in_own_feed() {
        let mut network = SocialNetwork::new();
        network.create_user("alice", "password1").unwrap();

        let out = run_session(
            &mut network,
            "2\nalice\npassword1\n1\nyes\nhello world\n1\nno\n4\n3\n",
        );
        assert!(out.contains("hello world"));
        assert_eq!(network.post_count(), 1);
    }

    #[test]
    fn test_rejected_post_content_reprompts() {
        let mut network = SocialNetwork::new();
        network.create_user("alice", "password1").unwrap();

        let out = run_session(&mut network, "2\nalice\npassword1\n1\nyes\n\nok then\n4\n3\n");
        assert!(out.contains("Post content must be 1-5000 characters"));
        assert_eq!(network.post_count(), 1);
    }

    #[test]
    fn test_add_friend_by_username() {
        let mut network = SocialNetwork::new();
        network.create_user("alice", "password1").unwrap();
        network.create_user("bobby", "password2").unwrap();

        let out = run_session(&mut network, "2\nalice\npassword1\n3\nyes\nbobby\n4\n3\n");
        assert!(out.contains("You are now friends with bobby!"));
        assert!(network
            .are_friends(UserId(1), UserId(2))
            .unwrap());
    }

    #[test]
    fn test_add_friend_rejects_self_and_unknown_names() {
        let mut network = SocialNetwork::new();
        network.create_user("alice", "password1").unwrap();
        network.create_user("bobby", "password2").unwrap();

        let out = run_session(
            &mut network,
            "2\nalice\npassword1\n3\nyes\nalice\ncarol\nbobby\n4\n3\n",
        );
        assert!(out.contains("You can't add yourself."));
        assert!(out.contains("Username not found."));
        assert!(out.contains("You are now friends with bobby!"));
    }

    #[test]
    fn test_adding_an_existing_friend_is_refused() {
        let mut network = SocialNetwork::new();
        network.create_user("alice", "password1").unwrap();
        network.create_user("bobby", "password2").unwrap();
        network.add_friendship(UserId(1), UserId(2)).unwrap();

        let out = run_session(&mut network, "2\nalice\npassword1\n3\nyes\nbobby\n4\n3\n");
        assert!(out.contains("You are already friends with bobby."));
        assert_eq!(network.friends_of(UserId(1)), vec![UserId(2)]);
    }

    #[test]
    fn test_friends_view_lists_usernames() {
        let mut network = SocialNetwork::new();
        network.create_user("alice", "password1").unwrap();
        network.create_user("bobby", "password2").unwrap();
        network.add_friendship(UserId(1), UserId(2)).unwrap();

        let out = run_session(&mut network, "2\nalice\npassword1\n2\n4\n3\n");
        assert!(out.contains("-- alice's Friends --"));
        assert!(out.contains("1. bobby"));
    }

    #[test]
    fn test_end_of_input_leaves_cleanly() {
        let mut network = SocialNetwork::new();
        assert!(run_session(&mut network, "").contains("-- MINGLE --"));
        // Mid-flow end of input is also a clean exit.
        run_session(&mut network, "1\nalice\n");
        run_session(&mut network, "1\n");
    }

    #[test]
    fn test_unknown_menu_choice_redisplays_menu() {
        let mut network = SocialNetwork::new();
        let out = run_session(&mut network, "9\n3\n");
        assert!(out.matches("1. Sign Up").count() >= 2);
    }
}
