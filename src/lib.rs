//! Workspace tooling package. Holds the shared pre-commit hook configuration.
