use rstest::rstest;
use sqlmcs_common::{ALL_TEST_CASES, Config, SqlTestCase};
use sqlmcs_query::{QueryError, query_graph};
use sqlmcs_subgraph::compare;

fn run_case(case: &SqlTestCase) {
    let left = query_graph(case.left).unwrap();
    let right = query_graph(case.right).unwrap();

    let result = compare(&left, &right, &case.config).unwrap();
    assert_eq!(
        result.mcs_len(),
        case.expected_mcs_nodes,
        "{}: mcs size",
        case.name
    );
    assert!(
        (result.similarity - case.expected_similarity).abs() < 1e-9,
        "{}: similarity {} != {}",
        case.name,
        result.similarity,
        case.expected_similarity
    );

    let swapped = compare(&right, &left, &case.config).unwrap();
    assert!(
        (swapped.similarity - result.similarity).abs() < 1e-9,
        "{}: similarity depends on argument order",
        case.name
    );
}

#[test]
fn shared_cases() {
    for case in ALL_TEST_CASES.iter() {
        run_case(case);
    }
}

#[rstest]
#[case("SELECT u.name FROM users u WHERE u.status = 'active'", 4)]
#[case("SELECT u.id, u.name, u.email FROM users u WHERE u.status = 'active' AND u.age > 25", 7)]
#[case("SELECT o.id FROM orders o JOIN users u ON u.id = o.user_id WHERE u.id IN (1, 2)", 6)]
#[case("select count(*) from events", 1)]
fn graph_sizes(#[case] sql: &str, #[case] expected_nodes: usize) {
    assert_eq!(query_graph(sql).unwrap().len(), expected_nodes);
}

#[test]
fn identical_queries_are_fully_similar() {
    let sql = "SELECT c.name, c.city FROM customers c WHERE c.city = 'Paris' AND c.vip IS NOT NULL";
    let graph = query_graph(sql).unwrap();
    let result = compare(&graph, &graph, &Config::default()).unwrap();
    assert_eq!(result.mcs_len(), graph.len());
    assert_eq!(result.similarity, 100.0);
}

#[rstest]
#[case("SELEC a FROM t")]
#[case("SELECT a FROM t WHERE")]
#[case("SELECT FROM t")]
fn malformed_sql_is_a_parse_error(#[case] sql: &str) {
    assert!(matches!(query_graph(sql), Err(QueryError::Parse { .. })));
}

#[test]
fn non_select_statements_are_unsupported() {
    assert!(matches!(
        query_graph("UPDATE users SET name = 'x'"),
        Err(QueryError::Unsupported(_))
    ));
}
