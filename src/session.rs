use crate::error::Result;
use crate::namespace::{EntryId, Namespace};

/// The single user's view of the namespace: who they are and where they stand.
///
/// `current` only changes through [`Session::cd`] and [`Session::cd_back`],
/// and only when they succeed.
#[derive(Debug, Clone)]
pub struct Session {
    user: String,
    current: EntryId,
}

impl Session {
    /// Start a session for `user` positioned at `home`.
    pub fn new(user: impl Into<String>, home: EntryId) -> Self {
        Self {
            user: user.into(),
            current: home,
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// The directory relative commands operate on.
    pub fn current(&self) -> EntryId {
        self.current
    }

    pub fn cd(&mut self, namespace: &Namespace, name: &str) -> Result<()> {
        self.current = namespace.cd(self.current, name)?;
        Ok(())
    }

    pub fn cd_back(&mut self, namespace: &Namespace) -> Result<()> {
        self.current = namespace.cd_back(self.current)?;
        Ok(())
    }

    pub fn pwd(&self, namespace: &Namespace) -> String {
        namespace.pwd(self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FsError;

    #[test]
    fn test_cd_sequence_is_reflected_in_pwd() {
        let ns = Namespace::seeded().unwrap();
        let mut session = Session::new("tester", ns.root());

        session.cd(&ns, "folder").unwrap();
        session.cd(&ns, "Misc").unwrap();

        assert_eq!(session.pwd(&ns), "Home/folder/Misc");
    }

    #[test]
    fn test_failed_cd_keeps_position() {
        let ns = Namespace::seeded().unwrap();
        let mut session = Session::new("tester", ns.root());
        let before = session.current();

        assert!(matches!(
            session.cd(&ns, "missing"),
            Err(FsError::NotFound { .. })
        ));
        assert!(matches!(
            session.cd(&ns, "Random.java"),
            Err(FsError::NotADirectory(_))
        ));
        assert_eq!(session.current(), before);
    }

    #[test]
    fn test_cd_back_undoes_cd() {
        let ns = Namespace::seeded().unwrap();
        let mut session = Session::new("tester", ns.root());

        session.cd(&ns, "folder").unwrap();
        session.cd_back(&ns).unwrap();
        assert_eq!(session.current(), ns.root());

        assert!(matches!(session.cd_back(&ns), Err(FsError::AtRoot)));
        assert_eq!(session.current(), ns.root());
    }
}
