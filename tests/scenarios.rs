//! End-to-end behavior of the DDL to DOT pipeline.

use sql_graphviz::color::edge_color;
use sql_graphviz::render::preamble;
use sql_graphviz::{Header, ParseError, RenderConfig, generate};

fn header() -> Header {
    Header::new("schema.sql", "2024-06-01T12:00:00Z")
}

fn dot(input: &str) -> String {
    generate(input, &header(), &RenderConfig::default()).expect("input should parse")
}

fn body(input: &str) -> String {
    let out = dot(input);
    let start = preamble(&header()).len();
    out[start..out.len() - "}\n".len()].to_owned()
}

fn edge_lines(out: &str) -> Vec<&str> {
    out.lines().filter(|line| line.contains(" -> ")).collect()
}

fn field_rows(out: &str) -> Vec<&str> {
    out.lines().filter(|line| line.contains("align=\"left\"")).collect()
}

#[test]
fn single_table_renders_one_node_with_field_rows() {
    let out = body("CREATE TABLE foo (id INT PRIMARY KEY, name TEXT);");
    assert_eq!(out.matches("\"foo\" [").count(), 1);
    let rows = field_rows(&out);
    assert_eq!(rows.len(), 2);
    assert!(rows[0].contains("port=\"id\"><font face=\"Times-bold\">id</font>"));
    assert!(rows[0].contains(">INT PRIMARY KEY</font>"));
    assert!(rows[1].contains("port=\"name\"><font face=\"Times-bold\">name</font>"));
    assert!(rows[1].contains(">TEXT</font>"));
    assert!(edge_lines(&out).is_empty());
}

#[test]
fn inline_foreign_key_renders_colored_edge() {
    let out = body("CREATE TABLE foo (id INT, CONSTRAINT fk1 FOREIGN KEY (bar_id) REFERENCES bar (id));");
    assert!(out.contains("\"foo\" ["));
    let expected = format!("  \"foo\":bar_id -> \"bar\":id [color=\"{}\"]", edge_color("foo", "bar_id", "bar", "id"));
    assert_eq!(edge_lines(&out), vec![expected.as_str()]);
}

#[test]
fn standalone_foreign_key_matches_inline_edge() {
    let inline = body("CREATE TABLE foo (id INT, CONSTRAINT fk1 FOREIGN KEY (bar_id) REFERENCES bar (id));");
    let standalone = body("ALTER TABLE ONLY foo ADD CONSTRAINT fk2 FOREIGN KEY (bar_id) REFERENCES bar (id);");
    assert_eq!(edge_lines(&standalone).len(), 1);
    assert_eq!(edge_lines(&standalone), edge_lines(&inline));
    assert_eq!(standalone.trim_end(), edge_lines(&inline)[0]);
}

#[test]
fn comments_produce_no_fragment() {
    let with_comment = body("-- a comment line\nCREATE TABLE foo (id INT PRIMARY KEY, name TEXT);");
    let without = body("CREATE TABLE foo (id INT PRIMARY KEY, name TEXT);");
    assert_eq!(with_comment, without);
    assert!(!with_comment.contains("a comment line"));
}

#[test]
fn unrecognized_statement_between_tables_is_skipped() {
    let first = "CREATE TABLE foo (id INT);";
    let second = "CREATE TABLE bar (id INT, foo_id INT);";
    let out = body(&format!("{first}\nCREATE INDEX idx ON foo (id);\n{second}"));
    assert_eq!(out, format!("{}{}", body(first), body(second)));
    assert!(!out.contains("idx"));
}

#[test]
fn fields_render_in_declaration_order() {
    let out = body("CREATE TABLE t (zeta INT, alpha INT, mid INT, CONSTRAINT f FOREIGN KEY (alpha) REFERENCES u (id), last INT);");
    let ports: Vec<&str> = field_rows(&out)
        .into_iter()
        .filter_map(|row| row.split("port=\"").nth(1)?.split('"').next())
        .collect();
    assert_eq!(ports, vec!["zeta", "alpha", "mid", "last"]);
}

#[test]
fn every_edge_color_uses_masked_channels() {
    let out = body(
        "CREATE TABLE a (id INT, CONSTRAINT f1 FOREIGN KEY (b_id) REFERENCES b (id), \
         CONSTRAINT f2 FOREIGN KEY (c_id) REFERENCES c (id));\n\
         ALTER TABLE ONLY b ADD CONSTRAINT f3 FOREIGN KEY (c_id) REFERENCES c (id);\n\
         ALTER TABLE ONLY c ADD CONSTRAINT f4 FOREIGN KEY (a_id) REFERENCES a (id);",
    );
    let edges = edge_lines(&out);
    assert_eq!(edges.len(), 4);
    for line in edges {
        let color = line.split("color=\"#").nth(1).expect("edge has a color");
        for channel in [&color[0..2], &color[2..4], &color[4..6]] {
            assert!(["00", "08", "80", "88"].contains(&channel), "{line}");
        }
    }
}

#[test]
fn mysqldump_style_input() {
    let input = r"
-- MySQL dump 10.13
/*!40101 SET @OLD_CHARACTER_SET_CLIENT=@@CHARACTER_SET_CLIENT */;
DROP TABLE IF EXISTS `orders`;
CREATE TABLE `orders` (
  `id` int(11) NOT NULL AUTO_INCREMENT,
  `customer_id` int(11) NOT NULL,
  `note` varchar(255) DEFAULT 'n/a, (none)',
  PRIMARY KEY (`id`),
  KEY `fk_customer` (`customer_id`),
  CONSTRAINT `fk_customer` FOREIGN KEY (`customer_id`) REFERENCES `customers` (`id`) ON DELETE CASCADE
) ENGINE=InnoDB AUTO_INCREMENT=42 DEFAULT CHARSET=utf8mb4;
/*!40101 SET character_set_client = @saved_cs_client */;
";
    let out = body(input);
    assert!(out.contains("\"orders\" ["));
    let rows = field_rows(&out);
    assert_eq!(rows.len(), 5);
    assert!(rows[0].contains("port=\"id\""));
    assert!(rows[0].contains(">int(11) NOT NULL AUTO_INCREMENT</font>"));
    assert!(rows[2].contains(">varchar(255) DEFAULT 'n/a, (none)'</font>"));
    assert!(rows[3].contains("port=\"PRIMARY\""));
    assert_eq!(
        edge_lines(&out),
        vec![format!(
            "  \"orders\":customer_id -> \"customers\":id [color=\"{}\"]",
            edge_color("orders", "customer_id", "customers", "id")
        )]
    );
}

#[test]
fn pg_dump_style_input() {
    let input = r"
SET statement_timeout = 0;
CREATE TABLE public.customers (
    id integer NOT NULL,
    name character varying(100)
);
CREATE SEQUENCE public.customers_id_seq START WITH 1 INCREMENT BY 1;
ALTER TABLE ONLY public.customers ALTER COLUMN id SET DEFAULT nextval('public.customers_id_seq'::regclass);
ALTER TABLE ONLY public.customers
    ADD CONSTRAINT customers_pkey PRIMARY KEY (id);
ALTER TABLE ONLY public.orders
    ADD CONSTRAINT orders_customer_id_fkey FOREIGN KEY (customer_id) REFERENCES public.customers(id) DEFERRABLE;
";
    let out = body(input);
    assert!(out.contains("\"public.customers\" ["));
    assert!(field_rows(&out)[1].contains(">character varying(100)</font>"));
    assert_eq!(edge_lines(&out).len(), 1);
    assert!(out.contains("  \"public.orders\":customer_id -> \"public.customers\":id [color=\"#"));
}

#[test]
fn malformed_create_table_aborts_whole_file() {
    let err = generate(
        "CREATE TABLE ok (id INT);\nCREATE TABLE broken (id INT, name VARCHAR(10);\nCREATE TABLE later (id INT);",
        &header(),
        &RenderConfig::default(),
    )
    .expect_err("a missing closing parenthesis is fatal");
    assert!(matches!(err, ParseError::Syntax { line: 2, ref found, .. } if found == "`;`"));
}

#[test]
fn statement_without_terminator_aborts() {
    let err = generate("CREATE TABLE ok (id INT);\nSELECT 1", &header(), &RenderConfig::default())
        .expect_err("missing semicolon is fatal");
    assert_eq!(err.to_string(), "unterminated statement starting at line 2, column 1");
}

#[test]
fn inline_foreign_key_without_references_aborts() {
    let err = generate(
        "CREATE TABLE foo (id INT, CONSTRAINT fk1 FOREIGN KEY (bar_id) bar (id));",
        &header(),
        &RenderConfig::default(),
    )
    .expect_err("a foreign key without REFERENCES is fatal");
    assert_eq!(err.to_string(), "syntax error at line 1, column 63: expected `REFERENCES`, found `bar`");
}

#[test]
fn inline_primary_key_constraint_stays_a_row() {
    let out = body("CREATE TABLE foo (id INT, CONSTRAINT foo_pk PRIMARY KEY (id));");
    assert!(field_rows(&out)[1].contains("port=\"CONSTRAINT\""));
    assert!(edge_lines(&out).is_empty());
}

#[test]
fn quoted_table_names_stay_valid_dot() {
    let out = body("CREATE TABLE `a\"b` (id INT, FOREIGN KEY (id) REFERENCES `c\"d` (id));");
    assert!(out.starts_with("  \"a\\\"b\" [\n"));
    assert!(out.contains("  \"a\\\"b\":id -> \"c\\\"d\":id [color=\"#"));
}
