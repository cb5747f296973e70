//! Synthetic DSL documents.

/// A small document touching every declaration kind.
pub const SAMPLE: &str = "\
interface Worker {
  work(hours: Int32): Void
  report(): String
}

interface AdvancedWorker extends Worker {
  lead(teamSize: Int32): Void
}

struct Engineer extends Person {
  specialty: String
  isWorking: Boolean
}

function hire(person: Person, position: String): Boolean

struct Person {
  id: Int32
  name: String
  tags: String[]
}

type KeyValue = { key: String, value: Int32 }

function addTags(person: Person, newTags: String[]): Person
";

/// Builds a document with `structs` structs, each extending the previous
/// one, plus one interface, function and alias per struct.
///
/// The chain is declared leaf first so every `extends` is a forward
/// reference.
#[must_use]
pub fn inheritance_chain(structs: usize) -> String {
    let mut output = String::new();
    for idx in (0..structs).rev() {
        if idx == 0 {
            output.push_str("struct Node0 {\n");
        } else {
            output.push_str(&format!("struct Node{} extends Node{} {{\n", idx, idx - 1));
        }
        output.push_str(&format!("  field{idx}: Int64\n"));
        output.push_str(&format!("  tags{idx}: Record<String, String[]>?\n"));
        output.push_str(&format!("  at{idx}: {{ seconds: Int64, nanos: Int32 }}\n"));
        output.push_str("}\n\n");

        output.push_str(&format!("interface Service{idx} {{\n"));
        output.push_str(&format!("  fetch(id: Int64, hint: String?): Page<Node{idx}>\n"));
        output.push_str("}\n\n");

        output.push_str(&format!(
            "function load{idx}<T>(url: String): ApiResponse<T>\n\n"
        ));
        output.push_str(&format!("type Ids{idx} = UInt64[]\n\n"));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_parses_cleanly() {
        let output = typemeld_schema::parse(SAMPLE);
        assert_eq!(output.document.len(), 7);
        assert!(output.diagnostics.is_empty());
    }

    #[test]
    fn test_inheritance_chain_resolves() {
        let output = typemeld_schema::parse(&inheritance_chain(10));
        assert!(output.diagnostics.is_empty());
        assert_eq!(output.document.len(), 40);

        let ir = typemeld_schema::DocumentIr::from_document(&output.document);
        assert!(ir.diagnostics.is_empty());
        let leaf = ir.get_struct("Node9").expect("Node9");
        assert_eq!(leaf.fields.len(), 30);
        assert_eq!(leaf.fields[0].name, "field0");
    }
}
