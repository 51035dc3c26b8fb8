// Client tests against a tiny local HTTP stub serving canned World Bank responses.

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;
use wbi_rank::{Client, CountryData, CountryList, CountryEntry};

const POP: &str = "SP.POP.TOTL";
const GDP: &str = "NY.GDP.MKTP.CD";

fn body(indicator: &str, value: &str) -> String {
    format!(
        r#"[{{"page":1,"pages":1,"per_page":1,"total":1}},[{{"indicator":{{"id":"{indicator}","value":"x"}},"countryiso3code":"XXX","date":"2023","value":{value}}}]]"#
    )
}

/// Canned reply for a request path: (status line, body).
fn route(path: &str) -> (&'static str, String) {
    let code = path.split('/').nth(3).unwrap_or("");
    let ind = if path.contains(POP) { POP } else { GDP };
    match (code, ind) {
        ("BTH", POP) => ("200 OK", body(POP, "10")),
        ("BTH", _) => ("200 OK", body(GDP, "500.5")),
        ("POP", POP) => ("200 OK", body(POP, "7")),
        ("POP", _) => ("200 OK", r#"[{"page":0,"pages":0,"per_page":1,"total":0},[]]"#.into()),
        ("GDP", POP) => ("200 OK", body(POP, "null")),
        ("GDP", _) => ("200 OK", body(GDP, "1e9")),
        ("NON", _) => ("200 OK", r#"[{"page":0,"pages":0,"per_page":1,"total":0},null]"#.into()),
        ("BAD", POP) => ("200 OK", body(POP, "10")),
        ("BAD", _) => ("200 OK", "<html>maintenance</html>".into()),
        ("ERR", POP) => ("200 OK", body(POP, "10")),
        ("ERR", _) => ("500 Internal Server Error", String::new()),
        _ => ("404 Not Found", String::new()),
    }
}

fn handle(stream: TcpStream) {
    let mut reader = BufReader::new(stream.try_clone().unwrap());
    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    // drain headers
    let mut line = String::new();
    while reader.read_line(&mut line).map(|n| n > 2).unwrap_or(false) {
        line.clear();
    }
    let path = request_line.split_whitespace().nth(1).unwrap_or("/");
    let (status, body) = route(path);
    let mut stream = stream;
    let _ = write!(
        stream,
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.flush();
}

fn serve() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            handle(stream);
        }
    });
    format!("http://127.0.0.1:{port}/v2")
}

#[test]
fn both_indicators_present() {
    let client = Client::new(serve()).unwrap();
    assert_eq!(
        client.fetch_country("BTH"),
        Some(CountryData {
            population: Some(10),
            gdp: Some(500.5)
        })
    );
}

#[test]
fn one_indicator_missing_keeps_the_other() {
    let client = Client::new(serve()).unwrap();
    assert_eq!(
        client.fetch_country("POP"),
        Some(CountryData {
            population: Some(7),
            gdp: None
        })
    );
    assert_eq!(
        client.fetch_country("GDP"),
        Some(CountryData {
            population: None,
            gdp: Some(1e9)
        })
    );
}

#[test]
fn no_values_at_all_is_no_data() {
    let client = Client::new(serve()).unwrap();
    assert_eq!(client.fetch_country("NON"), None);
}

#[test]
fn failures_are_no_data() {
    let client = Client::new(serve()).unwrap();
    assert_eq!(client.fetch_country("ZZZ"), None); // 404
    assert_eq!(client.fetch_country("ERR"), None); // 500 on the second request
    assert_eq!(client.fetch_country("BAD"), None); // not json
}

#[test]
fn unreachable_host_is_no_data() {
    let port = {
        let l = TcpListener::bind("127.0.0.1:0").unwrap();
        l.local_addr().unwrap().port()
    };
    let client = Client::new(format!("http://127.0.0.1:{port}/v2")).unwrap();
    assert_eq!(client.fetch_country("BTH"), None);
}

#[test]
fn pipeline_over_http_keeps_rows() {
    let client = Client::new(serve()).unwrap();
    let list = CountryList::new(vec![
        CountryEntry::new("Both", "BTH"),
        CountryEntry::new("Nothing", "NON"),
        CountryEntry::new("Pop only", "POP"),
        CountryEntry::new("Broken", "ERR"),
    ])
    .unwrap();
    let table = wbi_rank::collect(&client, &list, 2).unwrap();
    let names: Vec<&str> = table.rows.iter().map(|r| r.country.as_str()).collect();
    assert_eq!(names, ["Both", "Nothing", "Pop only", "Broken"]);
    assert_eq!(table.rows[0].population_rank, Some(1.0));
    assert_eq!(table.rows[2].population_rank, Some(2.0));
    assert_eq!(table.rows[0].gdp_rank, Some(1.0));
    assert_eq!(table.rows[2].gdp_rank, None);
    assert_eq!(table.rows[3].population, None);
    assert_eq!(table.rows[3].gdp_rank, None);
}
