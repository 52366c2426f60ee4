//! Identifier helpers: camel casing, property names, qualified names and
//! reserved-word lookups.

/// Characters that split words when camel casing a column name.
const WORD_SEPARATORS: &[char] = &['_', '-', '@', '$', '#', ' ', '/', '&'];

/// Whether `s` is present and not blank.
pub fn has_value(s: Option<&str>) -> bool {
    s.is_some_and(|v| !v.trim().is_empty())
}

/// Camel-case a database identifier or free text.
///
/// Separator characters are dropped and the following character is upper
/// cased; every other character is lower cased. Leading separators are
/// skipped without capitalising. With `first_upper` the first character of
/// the result is upper cased as well.
pub fn camel_case(input: &str, first_upper: bool) -> String {
    let mut out = String::with_capacity(input.len());
    let mut next_upper = false;

    for c in input.chars() {
        if WORD_SEPARATORS.contains(&c) {
            if !out.is_empty() {
                next_upper = true;
            }
        } else if next_upper {
            out.extend(c.to_uppercase());
            next_upper = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }

    if first_upper {
        upper_first(&out)
    } else {
        out
    }
}

/// Normalize a name into a bean-style property name.
///
/// Names shorter than two characters are lower cased. `Xy...` becomes
/// `xy...`, while `XY...` is left alone so acronyms survive.
pub fn valid_property_name(input: &str) -> String {
    let mut chars = input.chars();
    match (chars.next(), chars.next()) {
        (Some(first), Some(second)) => {
            if first.is_uppercase() && !second.is_uppercase() {
                let mut out: String = first.to_lowercase().collect();
                out.push_str(&input[first.len_utf8()..]);
                out
            } else {
                input.to_string()
            }
        }
        _ => input.to_lowercase(),
    }
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Join catalog, schema and table with `.`, skipping blank qualifiers.
///
/// A catalog without a schema keeps the empty schema slot (`cat..table`),
/// which is how JDBC-style tools spell "default schema in this catalog".
pub fn compose_qualified_name(catalog: Option<&str>, schema: Option<&str>, table: &str) -> String {
    let mut out = String::new();
    if let Some(catalog) = catalog.filter(|c| has_value(Some(c))) {
        out.push_str(catalog);
        out.push('.');
    }
    if let Some(schema) = schema.filter(|s| has_value(Some(s))) {
        out.push_str(schema);
        out.push('.');
    } else if !out.is_empty() {
        out.push('.');
    }
    out.push_str(table);
    out
}

/// Whether a name pattern contains a SQL `LIKE` wildcard (`%` or `_`).
pub fn contains_sql_wildcard(s: Option<&str>) -> bool {
    s.is_some_and(|v| v.contains('%') || v.contains('_'))
}

/// Whether a name contains a space and therefore needs delimiting.
pub fn contains_space(s: Option<&str>) -> bool {
    s.is_some_and(|v| v.contains(' '))
}

// ============================================================================
// Reserved words
// ============================================================================

const JAVA_RESERVED_WORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "null", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "true", "try", "void", "volatile", "while",
];

const SQL_RESERVED_WORDS: &[&str] = &[
    "ABSOLUTE", "ACTION", "ADD", "ALL", "ALLOCATE", "ALTER", "AND", "ANY", "ARE", "AS", "ASC",
    "ASSERTION", "AT", "AUTHORIZATION", "AVG", "BEGIN", "BETWEEN", "BIT", "BIT_LENGTH", "BOTH",
    "BY", "CASCADE", "CASCADED", "CASE", "CAST", "CATALOG", "CHAR", "CHARACTER", "CHAR_LENGTH",
    "CHARACTER_LENGTH", "CHECK", "CLOSE", "COALESCE", "COLLATE", "COLLATION", "COLUMN", "COMMIT",
    "CONNECT", "CONNECTION", "CONSTRAINT", "CONSTRAINTS", "CONTINUE", "CONVERT", "CORRESPONDING",
    "COUNT", "CREATE", "CROSS", "CURRENT", "CURRENT_DATE", "CURRENT_TIME", "CURRENT_TIMESTAMP",
    "CURRENT_USER", "CURSOR", "DATE", "DAY", "DEALLOCATE", "DEC", "DECIMAL", "DECLARE", "DEFAULT",
    "DEFERRABLE", "DEFERRED", "DELETE", "DESC", "DESCRIBE", "DESCRIPTOR", "DIAGNOSTICS",
    "DISCONNECT", "DISTINCT", "DOMAIN", "DOUBLE", "DROP", "ELSE", "END", "END-EXEC", "ESCAPE",
    "EXCEPT", "EXCEPTION", "EXEC", "EXECUTE", "EXISTS", "EXTERNAL", "EXTRACT", "FALSE", "FETCH",
    "FIRST", "FLOAT", "FOR", "FOREIGN", "FOUND", "FROM", "FULL", "GET", "GLOBAL", "GO", "GOTO",
    "GRANT", "GROUP", "HAVING", "HOUR", "IDENTITY", "IMMEDIATE", "IN", "INDEX", "INDICATOR",
    "INITIALLY", "INNER", "INPUT", "INSENSITIVE", "INSERT", "INT", "INTEGER", "INTERSECT",
    "INTERVAL", "INTO", "IS", "ISOLATION", "JOIN", "KEY", "LANGUAGE", "LAST", "LEADING", "LEFT",
    "LEVEL", "LIKE", "LIMIT", "LOCAL", "LOWER", "MATCH", "MAX", "MIN", "MINUTE", "MODULE", "MONTH",
    "NAMES", "NATIONAL", "NATURAL", "NCHAR", "NEXT", "NO", "NOT", "NULL", "NULLIF", "NUMERIC",
    "OCTET_LENGTH", "OF", "ON", "ONLY", "OPEN", "OPTION", "OR", "ORDER", "OUTER", "OUTPUT",
    "OVERLAPS", "PAD", "PARTIAL", "POSITION", "PRECISION", "PREPARE", "PRESERVE", "PRIMARY",
    "PRIOR", "PRIVILEGES", "PROCEDURE", "PUBLIC", "READ", "REAL", "REFERENCES", "RELATIVE",
    "RESTRICT", "REVOKE", "RIGHT", "ROLLBACK", "ROWS", "SCHEMA", "SCROLL", "SECOND", "SECTION",
    "SELECT", "SESSION", "SESSION_USER", "SET", "SIZE", "SMALLINT", "SOME", "SPACE", "SQL",
    "SQLCODE", "SQLERROR", "SQLSTATE", "STATUS", "SUBSTRING", "SUM", "SYSTEM_USER", "TABLE",
    "TEMPORARY", "THEN", "TIME", "TIMESTAMP", "TIMEZONE_HOUR", "TIMEZONE_MINUTE", "TO",
    "TRAILING", "TRANSACTION", "TRANSLATE", "TRANSLATION", "TRIM", "TRUE", "UNION", "UNIQUE",
    "UNKNOWN", "UPDATE", "UPPER", "USAGE", "USER", "USING", "VALUE", "VALUES", "VARCHAR",
    "VARYING", "VIEW", "WHEN", "WHENEVER", "WHERE", "WITH", "WORK", "WRITE", "YEAR", "ZONE",
];

/// Case-sensitive lookup in the target language keyword list.
pub fn is_java_reserved_word(word: &str) -> bool {
    JAVA_RESERVED_WORDS.contains(&word)
}

/// Case-insensitive lookup in the SQL reserved word list.
pub fn is_sql_reserved_word(word: &str) -> bool {
    let upper = word.to_uppercase();
    SQL_RESERVED_WORDS.contains(&upper.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Camel casing
    // ========================================================================

    #[test]
    fn test_camel_case_snake_column() {
        assert_eq!(camel_case("user_name", false), "userName");
        assert_eq!(camel_case("USER_NAME", false), "userName");
        assert_eq!(camel_case("user_name", true), "UserName");
    }

    #[test]
    fn test_camel_case_free_text() {
        assert_eq!(camel_case("Street Address", true), "StreetAddress");
        assert_eq!(camel_case("a-b@c$d#e/f&g", false), "aBCDEFG");
    }

    #[test]
    fn test_camel_case_leading_separators_skipped() {
        assert_eq!(camel_case("__id", false), "id");
        assert_eq!(camel_case("", true), "");
    }

    #[test]
    fn test_camel_case_is_stable() {
        let once = camel_case("order_line_item", false);
        assert_eq!(camel_case("order_line_item", false), once);
    }

    // ========================================================================
    // Property names
    // ========================================================================

    #[test]
    fn test_valid_property_name() {
        assert_eq!(valid_property_name("Name"), "name");
        assert_eq!(valid_property_name("URL"), "URL");
        assert_eq!(valid_property_name("X"), "x");
        assert_eq!(valid_property_name("addr_StreetAddress"), "addr_StreetAddress");
        assert_eq!(valid_property_name("user_name"), "user_name");
    }

    // ========================================================================
    // Qualified names and wildcards
    // ========================================================================

    #[test]
    fn test_compose_qualified_name() {
        assert_eq!(compose_qualified_name(None, None, "t"), "t");
        assert_eq!(compose_qualified_name(None, Some("s"), "t"), "s.t");
        assert_eq!(compose_qualified_name(Some("c"), Some("s"), "t"), "c.s.t");
        assert_eq!(compose_qualified_name(Some("c"), None, "t"), "c..t");
        assert_eq!(compose_qualified_name(Some("  "), Some(""), "t"), "t");
    }

    #[test]
    fn test_contains_sql_wildcard() {
        assert!(contains_sql_wildcard(Some("user%")));
        assert!(contains_sql_wildcard(Some("user_role")));
        assert!(!contains_sql_wildcard(Some("users")));
        assert!(!contains_sql_wildcard(None));
    }

    // ========================================================================
    // Reserved words
    // ========================================================================

    #[test]
    fn test_reserved_words() {
        assert!(is_java_reserved_word("class"));
        assert!(!is_java_reserved_word("Class"));
        assert!(is_sql_reserved_word("order"));
        assert!(is_sql_reserved_word("Select"));
        assert!(!is_sql_reserved_word("user_name"));
    }
}
