use serde_json::{json, Value};

/// Full metadata document as served by the current API version.
pub fn current_metadata() -> Value {
    json!({
        "_links": {
            "maven-project": {"href": "http://localhost/starter.zip?type=maven-project", "templated": true}
        },
        "dependencies": {
            "type": "hierarchical-multi-select",
            "values": [
                {
                    "name": "Core",
                    "values": [
                        {"id": "web", "name": "Web", "description": "Web dependency description"},
                        {"id": "security", "name": "Security"},
                        {"id": "data-jpa", "name": "Data JPA", "versionRange": "[2.0.0,3.0.0)"}
                    ]
                },
                {
                    "name": "Other",
                    "values": [
                        {"id": "org.acme:foo", "name": "Foo"},
                        {"id": "org.acme:bar", "name": "Bar", "_links": {"guide": {"href": "https://example.com/guide"}}}
                    ]
                }
            ]
        },
        "type": {
            "type": "action",
            "default": "maven-project",
            "values": [
                {"id": "maven-build", "name": "Maven POM", "action": "/pom.xml", "tags": {"build": "maven", "format": "build"}},
                {"id": "maven-project", "name": "Maven Project", "action": "/starter.zip", "tags": {"build": "maven", "format": "project"}},
                {"id": "gradle-project", "name": "Gradle Project", "action": "/starter.zip", "tags": {"build": "gradle", "format": "project"}}
            ]
        },
        "packaging": {
            "type": "single-select",
            "default": "jar",
            "values": [
                {"id": "jar", "name": "Jar"},
                {"id": "war", "name": "War"}
            ]
        },
        "javaVersion": {
            "type": "single-select",
            "default": "17",
            "values": [
                {"id": "17", "name": "17"},
                {"id": "21", "name": "21"}
            ]
        },
        "language": {
            "type": "single-select",
            "default": "java",
            "values": [
                {"id": "groovy", "name": "Groovy"},
                {"id": "java", "name": "Java"},
                {"id": "kotlin", "name": "Kotlin"}
            ]
        },
        "bootVersion": {
            "type": "single-select",
            "default": "2.4.1",
            "values": [
                {"id": "2.5.0-SNAPSHOT", "name": "2.5.0 (SNAPSHOT)"},
                {"id": "2.4.1", "name": "2.4.1"},
                {"id": "2.3.8.RELEASE", "name": "2.3.8"}
            ]
        },
        "groupId": {"type": "text", "default": "com.example"},
        "artifactId": {"type": "text", "default": "demo"}
    })
}

/// The subset of the metadata an older client version relies on. Arrays
/// list fewer entries than the current document serves.
pub fn older_client_metadata() -> Value {
    json!({
        "dependencies": {
            "type": "hierarchical-multi-select",
            "values": [
                {
                    "name": "Core",
                    "values": [
                        {"id": "web", "name": "Web"},
                        {"id": "security", "name": "Security"}
                    ]
                }
            ]
        },
        "type": {
            "default": "maven-project",
            "values": [
                {"id": "maven-project", "name": "Maven Project", "action": "/starter.zip"}
            ]
        },
        "packaging": {"default": "jar", "values": [{"id": "jar", "name": "Jar"}]},
        "language": {"values": [{"id": "java", "name": "Java"}]},
        "bootVersion": {"values": [{"id": "2.4.1", "name": "2.4.1"}]}
    })
}
