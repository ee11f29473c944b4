use serde_json::json;

/// JSON Schema definitions for the MCP responses this server produces.
pub fn get_mcp_schema() -> serde_json::Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "definitions": {
            "InitializeResponse": {
                "type": "object",
                "properties": {
                    "jsonrpc": {"const": "2.0"},
                    "id": {"type": ["string", "number", "null"]},
                    "result": {
                        "type": "object",
                        "properties": {
                            "protocolVersion": {"type": "string"},
                            "capabilities": {
                                "type": "object",
                                "properties": {
                                    "tools": {"type": "object"}
                                },
                                "required": ["tools"]
                            },
                            "serverInfo": {
                                "type": "object",
                                "properties": {
                                    "name": {"type": "string"},
                                    "version": {"type": "string"}
                                },
                                "required": ["name", "version"]
                            }
                        },
                        "required": ["protocolVersion", "capabilities", "serverInfo"]
                    }
                },
                "required": ["jsonrpc", "id", "result"]
            },
            "ToolsListResponse": {
                "type": "object",
                "properties": {
                    "jsonrpc": {"const": "2.0"},
                    "id": {"type": ["string", "number", "null"]},
                    "result": {
                        "type": "object",
                        "properties": {
                            "tools": {
                                "type": "array",
                                "items": {
                                    "type": "object",
                                    "properties": {
                                        "name": {"type": "string"},
                                        "description": {"type": "string"},
                                        "inputSchema": {
                                            "type": "object",
                                            "properties": {
                                                "type": {"const": "object"},
                                                "properties": {"type": "object"},
                                                "required": {"type": "array", "items": {"type": "string"}}
                                            },
                                            "required": ["type"]
                                        }
                                    },
                                    "required": ["name", "inputSchema"]
                                }
                            }
                        },
                        "required": ["tools"]
                    }
                },
                "required": ["jsonrpc", "id", "result"]
            },
            "ToolCallResponse": {
                "type": "object",
                "properties": {
                    "jsonrpc": {"const": "2.0"},
                    "id": {"type": ["string", "number", "null"]},
                    "result": {
                        "type": "object",
                        "properties": {
                            "content": {
                                "type": "array",
                                "minItems": 1,
                                "items": {
                                    "type": "object",
                                    "properties": {
                                        "type": {"const": "text"},
                                        "text": {"type": "string"}
                                    },
                                    "required": ["type", "text"]
                                }
                            },
                            "isError": {"type": "boolean"}
                        },
                        "required": ["content"]
                    }
                },
                "required": ["jsonrpc", "id", "result"]
            },
            "ErrorResponse": {
                "type": "object",
                "properties": {
                    "jsonrpc": {"const": "2.0"},
                    "id": {"type": ["string", "number", "null"]},
                    "error": {
                        "type": "object",
                        "properties": {
                            "code": {"type": "integer"},
                            "message": {"type": "string"},
                            "data": {}
                        },
                        "required": ["code", "message"]
                    }
                },
                "required": ["jsonrpc", "id", "error"]
            }
        }
    })
}
