//! Test utilities for gateway tests.
//!
//! This module provides a scripted mock driver and sample provider payloads.

pub mod mock_driver;

#[allow(unused_imports)]
pub use mock_driver::{MockBehavior, MockDriver, MockResponse};

/// A complete artifact payload as a provider would return it.
#[allow(dead_code)]
pub fn sample_artifacts_json() -> serde_json::Value {
    serde_json::json!({
        "schema": "CREATE TABLE users (id BIGINT PRIMARY KEY);\nCREATE TABLE roles (id BIGINT PRIMARY KEY, name VARCHAR(20));\nCREATE TABLE user_roles (user_id BIGINT, role_id BIGINT);\nINSERT INTO roles (name) VALUES ('ADMIN'), ('INSTRUCTOR'), ('STUDENT');",
        "sourceFiles": [
            {"name": "User.java", "content": "@Entity\npublic class User {}", "kind": "entity"},
            {"name": "Role.java", "content": "@Entity\npublic class Role {}", "kind": "entity"},
            {"name": "SecurityConfig.java", "content": "@Configuration\npublic class SecurityConfig {}", "kind": "config"},
            {"name": "CourseController.java", "content": "@RestController\n@PreAuthorize(\"hasRole('INSTRUCTOR')\")\npublic class CourseController {}", "kind": "controller"},
            {"name": "CourseRepository.java", "content": "public interface CourseRepository {}", "kind": "repository"}
        ],
        "diagram": {
            "nodes": [
                {"id": "users", "label": "Users"},
                {"id": "roles", "label": "Roles"},
                {"id": "courses", "label": "Courses"}
            ],
            "links": [
                {"source": "users", "target": "roles"},
                {"source": "courses", "target": "enrollments"}
            ]
        }
    })
}

/// The sample payload wrapped in a markdown fence with surrounding prose.
#[allow(dead_code)]
pub fn fenced(payload: &str) -> String {
    format!("Here is your architecture:\n```json\n{}\n```\nLet me know if you need changes.", payload)
}
