//! User role enum.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Asker,
    Solver,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asker => "asker",
            Self::Solver => "solver",
        }
    }

    /// Parses terminal input: surrounding whitespace and case are ignored.
    pub fn parse_input(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "asker" => Some(Self::Asker),
            "solver" => Some(Self::Solver),
            _ => None,
        }
    }

    pub fn all() -> &'static [Self] {
        &[Self::Asker, Self::Solver]
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    /// Strict parse of the stored form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asker" => Ok(Self::Asker),
            "solver" => Ok(Self::Solver),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
